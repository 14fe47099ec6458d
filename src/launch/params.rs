//! Positional invocation parameters handed over by the job script.

/// The 15 positional values, in the order the job script passes them.
///
/// Everything except `epochs` is forwarded to the training script verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationParams {
    pub data_dir: String,
    pub out_dir: String,
    pub model_id: String,
    pub cm_format: String,
    pub model_type: String,
    pub height: String,
    pub width: String,
    pub latent_dim: String,
    pub amp: String,
    pub distributed: String,
    pub batch_size: String,
    pub epochs: u32,
    pub sample_interval: String,
    pub optimizer: String,
    /// Empty when training starts from scratch.
    pub checkpoint: String,
}

impl InvocationParams {
    pub fn amp_enabled(&self, token: &str) -> bool {
        self.amp == token
    }

    pub fn distributed_enabled(&self, token: &str) -> bool {
        self.distributed == token
    }

    pub fn checkpoint(&self) -> Option<&str> {
        (!self.checkpoint.is_empty()).then_some(self.checkpoint.as_str())
    }

    /// Value the training script receives as its total-iterations interval.
    pub fn total_iterations(&self) -> u64 {
        u64::from(self.epochs) + 1
    }
}

#[cfg(test)]
pub(crate) fn sample_params() -> InvocationParams {
    InvocationParams {
        data_dir: "/gpfs/alpine/med110/fs-pep/cm.h5".to_string(),
        out_dir: "/gpfs/alpine/med110/runs".to_string(),
        model_id: "vae-fs-pep".to_string(),
        cm_format: "sparse-concat".to_string(),
        model_type: "resnet".to_string(),
        height: "22".to_string(),
        width: "22".to_string(),
        latent_dim: "10".to_string(),
        amp: "amp".to_string(),
        distributed: "distributed".to_string(),
        batch_size: "128".to_string(),
        epochs: 5,
        sample_interval: "20".to_string(),
        optimizer: "adam".to_string(),
        checkpoint: String::new(),
    }
}
