//! Target-language tags sent alongside each chat message
//!
//! The backend prefixes the prompt with `[Language: <tag>]`, so the tag
//! strings must match exactly what it expects.

use crate::errors::{ChatError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Config/CLI value that disables the language field entirely
pub const NO_LANGUAGE: &str = "none";

/// Supported programming-language tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    #[serde(rename = "C++")]
    Cpp,
    #[serde(rename = "C#")]
    CSharp,
    Go,
    Rust,
    #[serde(rename = "PHP")]
    Php,
    Ruby,
    Swift,
    Kotlin,
    Scala,
    R,
    #[serde(rename = "MATLAB")]
    Matlab,
    #[serde(rename = "SQL")]
    Sql,
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "CSS")]
    Css,
    Bash,
    PowerShell,
}

impl Language {
    /// All tags, in menu order
    pub const ALL: [Language; 20] = [
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Java,
        Language::Cpp,
        Language::CSharp,
        Language::Go,
        Language::Rust,
        Language::Php,
        Language::Ruby,
        Language::Swift,
        Language::Kotlin,
        Language::Scala,
        Language::R,
        Language::Matlab,
        Language::Sql,
        Language::Html,
        Language::Css,
        Language::Bash,
        Language::PowerShell,
    ];

    /// Wire tag
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Php => "PHP",
            Language::Ruby => "Ruby",
            Language::Swift => "Swift",
            Language::Kotlin => "Kotlin",
            Language::Scala => "Scala",
            Language::R => "R",
            Language::Matlab => "MATLAB",
            Language::Sql => "SQL",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Bash => "Bash",
            Language::PowerShell => "PowerShell",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Language::Python => "🐍",
            Language::JavaScript => "🟨",
            Language::TypeScript => "🔷",
            Language::Java => "☕",
            Language::Cpp => "⚡",
            Language::CSharp => "💜",
            Language::Go => "🔵",
            Language::Rust => "🦀",
            Language::Php => "🐘",
            Language::Ruby => "💎",
            Language::Swift => "🍎",
            Language::Kotlin => "🟠",
            Language::Scala => "🔴",
            Language::R => "📊",
            Language::Matlab => "🧮",
            Language::Sql => "🗄️",
            Language::Html => "🌐",
            Language::Css => "🎨",
            Language::Bash => "💻",
            Language::PowerShell => "🔧",
        }
    }

    /// Parse a tag, treating `"none"` as "no language field"
    pub fn parse_optional(input: &str) -> Result<Option<Language>> {
        if input.trim().eq_ignore_ascii_case(NO_LANGUAGE) {
            return Ok(None);
        }
        input.parse().map(Some)
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Python
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = ChatError;

    /// Case-insensitive match on the wire tag, plus a few spellings that
    /// are awkward to type in a shell
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        if let Some(lang) = Language::ALL
            .iter()
            .find(|lang| lang.tag().eq_ignore_ascii_case(wanted))
        {
            return Ok(*lang);
        }

        match wanted.to_ascii_lowercase().as_str() {
            "cpp" | "cxx" => Ok(Language::Cpp),
            "csharp" | "cs" => Ok(Language::CSharp),
            "js" => Ok(Language::JavaScript),
            "ts" => Ok(Language::TypeScript),
            "py" => Ok(Language::Python),
            "rs" => Ok(Language::Rust),
            _ => Err(ChatError::UnknownLanguage(wanted.to_string())),
        }
    }
}
