//! Optional input hardening. Pure checks, not wired into the store itself;
//! the tool layer applies them only when strict validation is switched on.

/// Returns one message per failed check; an empty vec means the input
/// passed.
pub fn validate(name: &str, email: &str, age: u32) -> Vec<String> {
    let mut problems = Vec::new();
    if name.trim().chars().count() < 2 {
        problems.push("name must be at least 2 characters long".to_string());
    }
    if !(email.contains('@') && email.contains('.')) {
        problems.push("email must contain '@' and '.'".to_string());
    }
    if !(16..=80).contains(&age) {
        problems.push("age must be between 16 and 80".to_string());
    }
    problems
}
