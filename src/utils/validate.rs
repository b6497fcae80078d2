use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_display_name(name: &str) -> Result<(), &'static str> {
    // 显示名称长度校验：1 <= x <= 64（按字符计）
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be empty");
    }
    if trimmed.chars().count() > 64 {
        return Err("Name must be at most 64 characters long");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 可选：特殊字符（增强安全性）
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    // 1. 长度检查：至少 8 个字符
    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    // 2. 大写字母检查
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    // 3. 小写字母检查
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    // 4. 数字检查
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    // 5. 常见弱密码检查
    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}
