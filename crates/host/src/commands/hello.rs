pub const DEFAULT_NAME: &str = "world";

/// Write a greeting to the log
pub fn say_hello(name: Option<&str>) -> String {
    let greeting = format!("Hello {}!!!", name.unwrap_or(DEFAULT_NAME));
    tracing::info!("{greeting}");
    greeting
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting() {
        assert_eq!(say_hello(None), "Hello world!!!");
        assert_eq!(say_hello(Some("sulog")), "Hello sulog!!!");
    }
}
