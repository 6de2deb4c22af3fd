//! Project answers gathered from the user and their validation rules

use crate::error::ValidationError;
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_DESCRIPTION: &str = "A backend server built with Express and TypeScript";
pub const DEFAULT_AUTHOR: &str = "Anonymous";
pub const DEFAULT_LICENSE: &str = "MIT";
pub const DEFAULT_PORT: u16 = 8000;

/// Longest package name the npm registry accepts
const MAX_NAME_LENGTH: usize = 214;

const FORBIDDEN_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$").expect("valid name pattern"));

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Answers exactly as typed at the prompts, before defaults and validation
#[derive(Debug, Clone, Default)]
pub struct RawAnswers {
    pub name: String,
    pub description: String,
    pub author_name: String,
    pub author_email: String,
    pub license: String,
    pub port: String,
    pub docker: String,
    pub git_hooks: String,
    pub lint: String,
    pub format: String,
    pub test: String,
}

/// Optional outputs the user can switch on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    pub docker: bool,
    pub git_hooks: bool,
    pub lint: bool,
    pub format: bool,
    pub test: bool,
}

impl Features {
    pub fn all() -> Self {
        Self {
            docker: true,
            git_hooks: true,
            lint: true,
            format: true,
            test: true,
        }
    }

    /// Labels of the enabled toggles, in prompt order
    pub fn enabled_labels(&self) -> Vec<&'static str> {
        [
            (self.docker, "Docker"),
            (self.git_hooks, "Git hooks"),
            (self.lint, "ESLint"),
            (self.format, "Prettier"),
            (self.test, "Jest"),
        ]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect()
    }
}

/// Validated project configuration, passed by reference to every stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAnswers {
    pub name: String,
    pub description: String,
    pub author_name: String,
    pub author_email: Option<String>,
    pub license: String,
    pub port: u16,
    pub features: Features,
}

impl ProjectAnswers {
    /// Apply defaults and validate. The first violated rule is returned; there is no retry.
    pub fn from_raw(raw: &RawAnswers) -> Result<Self, ValidationError> {
        let name = raw.name.trim();
        validate_name(name)?;

        let author_email = match raw.author_email.trim() {
            "" => None,
            email => {
                validate_email(email)?;
                Some(email.to_string())
            }
        };

        Ok(Self {
            name: name.to_string(),
            description: or_default(&raw.description, DEFAULT_DESCRIPTION),
            author_name: or_default(&raw.author_name, DEFAULT_AUTHOR),
            author_email,
            license: or_default(&raw.license, DEFAULT_LICENSE),
            port: parse_port(&raw.port)?,
            features: Features {
                docker: parse_toggle(&raw.docker),
                git_hooks: parse_toggle(&raw.git_hooks),
                lint: parse_toggle(&raw.lint),
                format: parse_toggle(&raw.format),
                test: parse_toggle(&raw.test),
            },
        })
    }

    /// `Name <email>` when an email was given, otherwise the bare name
    pub fn author(&self) -> String {
        match &self.author_email {
            Some(email) => format!("{} <{}>", self.author_name, email),
            None => self.author_name.clone(),
        }
    }
}

fn or_default(input: &str, default: &str) -> String {
    match input.trim() {
        "" => default.to_string(),
        value => value.to_string(),
    }
}

/// Check a project name against package-name and directory-name rules
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Missing("Project name"));
    }
    if name.starts_with('.') || name.starts_with('_') {
        return Err(ValidationError::NameLeadingCharacter(name.to_string()));
    }
    if let Some(character) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(ValidationError::NameForbiddenCharacter {
            name: name.to_string(),
            character,
        });
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong(name.len()));
    }
    if !NAME_PATTERN.is_match(name) {
        return Err(ValidationError::NamePattern(name.to_string()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::Email(email.to_string()))
    }
}

/// Parse a port, falling back to the default on empty input
pub fn parse_port(input: &str) -> Result<u16, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(DEFAULT_PORT);
    }
    // u16::from_str accepts a leading '+' or '0', neither of which round-trips into PORT=
    if input.starts_with('0') || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::Port(input.to_string()));
    }
    match input.parse::<u16>() {
        Ok(port) if port >= 1 => Ok(port),
        _ => Err(ValidationError::Port(input.to_string())),
    }
}

/// Anything starting with `y` or `Y` is a yes
pub fn parse_toggle(input: &str) -> bool {
    input
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str) -> RawAnswers {
        RawAnswers {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_names_accepted() {
        for name in ["my-api", "api2", "a1", "backend-server-template", "0x"] {
            assert!(validate_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_uppercase_and_hyphen_edges_rejected() {
        assert!(matches!(
            validate_name("MyApi"),
            Err(ValidationError::NamePattern(_))
        ));
        assert!(validate_name("-api").is_err());
        assert!(validate_name("api-").is_err());
        assert!(validate_name("a").is_err());
    }

    #[test]
    fn test_leading_dot_or_underscore_rejected() {
        assert!(matches!(
            validate_name(".hidden"),
            Err(ValidationError::NameLeadingCharacter(_))
        ));
        assert!(matches!(
            validate_name("_private"),
            Err(ValidationError::NameLeadingCharacter(_))
        ));
    }

    #[test]
    fn test_forbidden_characters_rejected() {
        for name in ["my/api", "my\\api", "a<b", "a>b", "a:b", "a\"b", "a|b", "a?b", "a*b"] {
            assert!(
                matches!(
                    validate_name(name),
                    Err(ValidationError::NameForbiddenCharacter { .. })
                ),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_name_length_limit() {
        let ok = "a".repeat(MAX_NAME_LENGTH);
        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_name(&ok).is_ok());
        assert_eq!(
            validate_name(&long),
            Err(ValidationError::NameTooLong(MAX_NAME_LENGTH + 1))
        );
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(
            ProjectAnswers::from_raw(&raw("   ")),
            Err(ValidationError::Missing("Project name"))
        );
    }

    #[test]
    fn test_port_range() {
        assert_eq!(parse_port(""), Ok(DEFAULT_PORT));
        assert_eq!(parse_port("1"), Ok(1));
        assert_eq!(parse_port("65535"), Ok(65535));
        assert_eq!(parse_port(" 9090 "), Ok(9090));
        for bad in ["0", "00", "08080", "65536", "-1", "+80", "80a", "http", "8000.5"] {
            assert!(parse_port(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_accepted_port_renders_as_typed() {
        for typed in ["1", "80", "8080", "9090", "65535"] {
            let port = parse_port(typed).unwrap();
            assert_eq!(port.to_string(), typed);
        }
    }

    #[test]
    fn test_toggle_parsing() {
        assert!(parse_toggle("y"));
        assert!(parse_toggle("Yes"));
        assert!(parse_toggle("YEAH"));
        assert!(!parse_toggle(""));
        assert!(!parse_toggle("n"));
        assert!(!parse_toggle("true"));
    }

    #[test]
    fn test_defaults_applied() {
        let answers = ProjectAnswers::from_raw(&raw("my-api")).unwrap();
        assert_eq!(answers.description, DEFAULT_DESCRIPTION);
        assert_eq!(answers.author_name, DEFAULT_AUTHOR);
        assert_eq!(answers.license, "MIT");
        assert_eq!(answers.port, 8000);
        assert_eq!(answers.author_email, None);
        assert_eq!(answers.features, Features::default());
    }

    #[test]
    fn test_author_formatting() {
        let mut input = raw("my-api");
        input.author_name = "Jane Doe".to_string();
        let answers = ProjectAnswers::from_raw(&input).unwrap();
        assert_eq!(answers.author(), "Jane Doe");

        input.author_email = "jane@example.com".to_string();
        let answers = ProjectAnswers::from_raw(&input).unwrap();
        assert_eq!(answers.author(), "Jane Doe <jane@example.com>");
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut input = raw("my-api");
        input.author_email = "jane.example.com".to_string();
        assert!(matches!(
            ProjectAnswers::from_raw(&input),
            Err(ValidationError::Email(_))
        ));
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a b@c.io").is_err());
    }

    #[test]
    fn test_enabled_labels_follow_prompt_order() {
        let features = Features {
            test: true,
            docker: true,
            ..Default::default()
        };
        assert_eq!(features.enabled_labels(), vec!["Docker", "Jest"]);
    }
}
