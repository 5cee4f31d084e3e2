/// Label and tooltip of a character counter for an input limited to `max`.
pub fn counter_text(value: &str, max: usize) -> (String, String) {
    let length = value.chars().count();
    (
        format!("{length}/{max}"),
        format!("{} characters remaining", max.saturating_sub(length)),
    )
}

#[cfg(test)]
mod tests {
    use super::counter_text;

    #[test]
    fn counts_towards_the_limit() {
        assert_eq!(
            counter_text("hello", 500),
            ("5/500".to_string(), "495 characters remaining".to_string())
        );
        assert_eq!(counter_text("", 20).0, "0/20");
        assert_eq!(counter_text("abc", 2).1, "0 characters remaining");
    }
}
