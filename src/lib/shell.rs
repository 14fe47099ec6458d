//! POSIX shell quoting for the printed command line.

/// Characters that never need quoting in a POSIX shell word.
fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '-' | '_' | '.' | '/' | ',' | '=' | ':' | '+' | '@' | '%')
}

/// Quote one word so that `sh` reads it back unchanged.
pub fn quote(word: &str) -> String {
    if !word.is_empty() && word.chars().all(is_shell_safe) {
        return word.to_string();
    }
    single_quote(word)
}

/// Quote the command word of a line. `sh` reads an unquoted `NAME=value` there as an
/// assignment, so any `=` forces quoting.
pub fn quote_command(word: &str) -> String {
    if word.contains('=') {
        return single_quote(word);
    }
    quote(word)
}

fn single_quote(word: &str) -> String {
    // Single quotes cannot be escaped inside single quotes: close, emit \', reopen.
    format!("'{}'", word.replace('\'', r"'\''"))
}

/// Join a command word and its arguments into a single copy-pasteable command line.
pub fn join<'a, I>(words: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut words = words.into_iter();
    let Some(command) = words.next() else {
        return String::new();
    };
    std::iter::once(quote_command(command))
        .chain(words.map(quote))
        .collect::<Vec<_>>()
        .join(" ")
}
