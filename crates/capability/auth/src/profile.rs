//! 用户资料与显示名
//!
//! 显示名回退顺序：
//! 1. name
//! 2. given_name + family_name
//! 3. given_name
//! 4. nickname
//! 5. 邮箱本地部分（`.`/`_`/`-` 换成空格，逐词首字母大写）
//! 6. 完整邮箱
//!
//! 空字符串视为缺失。

use crate::claims::UserInfo;

/// 会话中的用户资料。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub subject: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl From<&UserInfo> for UserProfile {
    fn from(info: &UserInfo) -> Self {
        Self {
            subject: present(&info.sub).map(str::to_string),
            display_name: resolve_display_name(info),
            email: present(&info.email).map(str::to_string),
        }
    }
}

pub fn resolve_display_name(info: &UserInfo) -> Option<String> {
    if let Some(name) = present(&info.name) {
        return Some(name.to_string());
    }
    match (present(&info.given_name), present(&info.family_name)) {
        (Some(given), Some(family)) => return Some(format!("{given} {family}")),
        (Some(given), None) => return Some(given.to_string()),
        _ => {}
    }
    if let Some(nickname) = present(&info.nickname) {
        return Some(nickname.to_string());
    }
    let email = present(&info.email)?;
    Some(name_from_email(email).unwrap_or_else(|| email.to_string()))
}

/// 头像缩写：前两个词的首字母；单词时取前两个字符并大写；否则用 `fallback`。
pub fn initials(name: Option<&str>, fallback: &str) -> String {
    let Some(name) = name else {
        return fallback.to_string();
    };
    let words: Vec<&str> = name.split_whitespace().collect();
    match words.as_slice() {
        [first, second, ..] => first.chars().take(1).chain(second.chars().take(1)).collect(),
        [only] => only.chars().take(2).collect::<String>().to_uppercase(),
        [] => fallback.to_string(),
    }
}

fn name_from_email(email: &str) -> Option<String> {
    let local = email.split('@').next().filter(|local| !local.is_empty())?;
    let words: Vec<String> = local
        .split(['.', '_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();
    if words.is_empty() {
        return None;
    }
    Some(words.join(" "))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
