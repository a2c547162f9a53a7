/// Split command output into lines, dropping empty ones.
///
/// Only `'\n'` separates lines; other whitespace, including a trailing
/// `'\r'`, is kept as-is.
pub fn non_empty_lines(output: &str) -> Vec<&str> {
    output.split('\n').filter(|line| !line.is_empty()).collect()
}
