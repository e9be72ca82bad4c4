/// Real name of the OS user, or the login when no real name is set.
pub fn os_user_name() -> String {
    let name = whoami::realname();
    if name.trim().is_empty() {
        return whoami::username();
    }
    name
}

/// `name` when given and not blank, the OS user otherwise.
pub fn author_or_os_user(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => os_user_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_or_os_user() {
        assert_eq!(author_or_os_user(Some(" Jane Doe ")), "Jane Doe");
        assert_eq!(author_or_os_user(Some("  ")), os_user_name());
        assert_eq!(author_or_os_user(None), os_user_name());
    }
}
