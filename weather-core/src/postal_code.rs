use std::sync::LazyLock;

use regex::Regex;

/// Eight digits, optionally hyphenated after the fifth (`DDDDD-DDD` or `DDDDDDDD`).
static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}-?[0-9]{3}$").expect("postal code pattern compiles"));

pub fn is_valid_postal_code(code: &str) -> bool {
    POSTAL_CODE.is_match(code)
}
