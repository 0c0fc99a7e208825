/// Split text on the space character. Runs of spaces and leading or
/// trailing spaces yield no empty tokens. Only ' ' delimits; any other
/// whitespace stays inside its token.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}
