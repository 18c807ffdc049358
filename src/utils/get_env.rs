use anyhow::{Error, anyhow};
use dotenv::dotenv;
use std::env;
use std::str::FromStr;

pub fn get_env_var(key: &str) -> Result<String, Error> {
    dotenv().ok();
    env::var(key).map_err(|e| anyhow!("{}: {}", key, e))
}

pub fn get_env_or(key: &str, default: &str) -> String {
    match get_env_var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

pub fn get_env_parsed<T: FromStr>(key: &str, default: T) -> T {
    get_env_var(key)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub fn env_var_to_vec(key: &str) -> Vec<String> {
    dotenv().ok();
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod cfg_tests {
    use super::*;

    #[test]
    fn test_env_helpers() {
        unsafe {
            env::set_var("PET_MEMORIAL_TEST_LIST", " a.com , ,b.com");
            env::set_var("PET_MEMORIAL_TEST_NUM", "42");
            env::set_var("PET_MEMORIAL_TEST_BLANK", "  ");
        }

        assert_eq!(
            env_var_to_vec("PET_MEMORIAL_TEST_LIST"),
            vec!["a.com".to_string(), "b.com".to_string()]
        );
        assert_eq!(get_env_parsed("PET_MEMORIAL_TEST_NUM", 7u32), 42);
        assert_eq!(get_env_parsed("PET_MEMORIAL_TEST_MISSING", 7u32), 7);
        assert_eq!(get_env_or("PET_MEMORIAL_TEST_BLANK", "fallback"), "fallback");
        assert!(get_env_var("PET_MEMORIAL_TEST_MISSING").is_err());
    }
}
