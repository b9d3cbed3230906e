//! Substitution definitions and hyperlink targets.
//!
//! Both may be referenced before they are defined, so the parser registers
//! them from explicit markup blocks in a first pass and inline markup is
//! resolved against the collected set in a second. Markup inside literal
//! blocks and code bodies is never seen as a definition.

use crate::error::RstError;
use crate::parser::SourceLine;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

static SUBSTITUTION_REGEX: OnceLock<Regex> = OnceLock::new();
static TARGET_REGEX: OnceLock<Regex> = OnceLock::new();

fn substitution_regex() -> &'static Regex {
    SUBSTITUTION_REGEX.get_or_init(|| {
        Regex::new(r"^\|([^|\s](?:[^|]*[^|\s])?)\|\s+([A-Za-z0-9][\w-]*)::(?:\s+(.*))?$").unwrap()
    })
}

fn target_regex() -> &'static Regex {
    TARGET_REGEX.get_or_init(|| Regex::new(r"^_(`[^`]+`|[^:`_][^:]*):(?:\s+(.*))?$").unwrap())
}

/// How a substitution's replacement text is produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// Inline markup, parsed where it is referenced
    Replace(String),
    /// Literal characters
    Unicode(String),
}

/// All substitutions and named targets of one document
#[derive(Debug, Default)]
pub struct Definitions {
    substitutions: HashMap<String, Substitution>,
    targets: HashMap<String, String>,
    problems: Vec<RstError>,
}

impl Definitions {
    /// Register the explicit markup block `.. <rest>` if it is a
    /// substitution definition or a named target
    ///
    /// `body` holds the dedented continuation lines. Returns `false` when
    /// the block is neither.
    pub(crate) fn register(&mut self, rest: &str, body: &[SourceLine], line: usize) -> bool {
        if let Some(caps) = substitution_regex().captures(rest) {
            let value = continued(caps.get(3).map_or("", |m| m.as_str()), body, " ");
            self.define_substitution(&caps[1], &caps[2].to_lowercase(), &value, line);
            return true;
        }
        if let Some(caps) = target_regex().captures(rest) {
            let uri = continued(caps.get(2).map_or("", |m| m.as_str()), body, "");
            self.targets
                .insert(normalize_name(caps[1].trim_matches('`')), uri);
            return true;
        }
        rest.starts_with('|')
    }

    /// Last definition of a name wins; redefinition is reported
    fn define_substitution(&mut self, name: &str, kind: &str, value: &str, line: usize) {
        let substitution = match kind {
            "replace" => Substitution::Replace(value.to_string()),
            "unicode" => match parse_unicode(value, line) {
                Ok(text) => Substitution::Unicode(text),
                Err(err) => {
                    self.problems.push(err);
                    return;
                }
            },
            _ => {
                self.problems.push(RstError::UnknownDirective {
                    line,
                    name: kind.to_string(),
                });
                return;
            }
        };

        if self.substitutions.contains_key(name) {
            self.problems.push(RstError::DuplicateSubstitution {
                line,
                name: name.to_string(),
            });
        }
        self.substitutions.insert(name.to_string(), substitution);
    }

    /// Problems found while registering definitions
    pub(crate) fn take_problems(&mut self) -> Vec<RstError> {
        std::mem::take(&mut self.problems)
    }

/// Exact name first, then a case-insensitive match
    pub fn substitution(&self, name: &str) -> Option<&Substitution> {
        self.substitutions.get(name).or_else(|| {
            let wanted = name.to_lowercase();
            self.substitutions
                .iter()
                .find(|(key, _)| key.to_lowercase() == wanted)
                .map(|(_, value)| value)
        })
    }

    pub fn target(&self, name: &str) -> Option<&str> {
        self.targets.get(&normalize_name(name)).map(String::as_str)
    }
}

/// Reference names are case- and whitespace-insensitive
pub(crate) fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// First-line value joined with its continuation lines
fn continued(first: &str, body: &[SourceLine], separator: &str) -> String {
    std::iter::once(first.trim())
        .chain(body.iter().map(|l| l.text.trim()))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

const HEX_PREFIXES: [&str; 7] = ["0x", "0X", "\\x", "x", "U+", "u", "\\u"];

/// Decode the argument of a `unicode::` substitution
///
/// Tokens are character codes (`0xA9`, `U+00A9`, `&#xA9;`, `169`) or literal
/// text; `..` starts a trailing comment.
fn parse_unicode(value: &str, line: usize) -> Result<String, RstError> {
    let mut out = String::new();

    for token in value.split_whitespace() {
        if token == ".." {
            break;
        }

        let hex = token
            .strip_prefix("&#x")
            .and_then(|rest| rest.strip_suffix(';'))
            .or_else(|| {
                HEX_PREFIXES
                    .iter()
                    .find_map(|prefix| token.strip_prefix(prefix))
            })
            .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()));

        let code = if let Some(digits) = hex {
            u32::from_str_radix(digits, 16).ok()
        } else if token.chars().all(|c| c.is_ascii_digit()) {
            token.parse::<u32>().ok()
        } else {
            out.push_str(token);
            continue;
        };

        match code.and_then(char::from_u32) {
            Some(ch) => out.push(ch),
            None => {
                return Err(RstError::InvalidCharacterCode {
                    line,
                    code: token.to_string(),
                })
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn define(defs: &mut Definitions, markup: &str) -> bool {
        let rest = markup.strip_prefix(".. ").unwrap();
        defs.register(rest, &[], 1)
    }

    #[test]
    fn test_register_replace_and_unicode() {
        let mut defs = Definitions::default();
        assert!(define(&mut defs, ".. |name| replace:: *lightbulb*"));
        assert!(define(&mut defs, ".. |copy| unicode:: 0xA9 .. copyright sign"));
        assert_eq!(
            defs.substitution("name"),
            Some(&Substitution::Replace("*lightbulb*".into()))
        );
        assert_eq!(
            defs.substitution("COPY"),
            Some(&Substitution::Unicode("\u{a9}".into()))
        );
        assert!(defs.take_problems().is_empty());
    }

    #[test]
    fn test_comments_are_not_definitions() {
        let mut defs = Definitions::default();
        assert!(!define(&mut defs, ".. just a comment"));
        assert!(!define(&mut defs, ".. __ anonymous"));
    }

    #[test]
    fn test_continuation_lines() {
        let mut defs = Definitions::default();
        let body = vec![SourceLine::new(2, "long replacement")];
        defs.register("|long| replace:: a", &body, 1);
        assert_eq!(
            defs.substitution("long"),
            Some(&Substitution::Replace("a long replacement".into()))
        );

        let body = vec![SourceLine::new(2, "/path")];
        defs.register("_site: https://example.com", &body, 1);
        assert_eq!(defs.target("site"), Some("https://example.com/path"));
    }

    #[test]
    fn test_unicode_code_forms() {
        assert_eq!(parse_unicode("U+2014", 1).unwrap(), "\u{2014}");
        assert_eq!(parse_unicode("&#x2026;", 1).unwrap(), "\u{2026}");
        assert_eq!(parse_unicode("169 text", 1).unwrap(), "\u{a9}text");
        assert!(matches!(
            parse_unicode("0xD800", 7),
            Err(RstError::InvalidCharacterCode { line: 7, .. })
        ));
    }

    #[test]
    fn test_duplicate_substitution_keeps_last() {
        let mut defs = Definitions::default();
        defs.register("|a| replace:: x", &[], 1);
        defs.register("|a| replace:: y", &[], 2);
        assert_eq!(defs.substitution("a"), Some(&Substitution::Replace("y".into())));
        assert_eq!(
            defs.take_problems(),
            vec![RstError::DuplicateSubstitution {
                line: 2,
                name: "a".into()
            }]
        );
    }

    #[test]
    fn test_targets_are_normalized() {
        let mut defs = Definitions::default();
        define(&mut defs, ".. _Rust Home: https://www.rust-lang.org");
        define(&mut defs, ".. _`Two  Words`: https://example.com/two");
        assert_eq!(defs.target("rust home"), Some("https://www.rust-lang.org"));
        assert_eq!(defs.target("two words"), Some("https://example.com/two"));
        assert_eq!(defs.target("missing"), None);
    }
}
