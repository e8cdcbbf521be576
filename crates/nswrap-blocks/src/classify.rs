//! Lexical classification of physical source lines.
//!
//! Classification never parses C/C++: a line is a directive when its code
//! (text outside comments) starts with `#`, and the directive kind is the
//! token following `#`. Block comments are tracked across lines so that a
//! line sitting wholly inside `/* ... */` classifies as comment text, and the
//! code remaining after a closing `*/` is classified on its own merits.

/// Preprocessor directive kind of a logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DirectiveKind {
    /// `#if`, `#ifdef`, `#ifndef`
    If,
    /// `#elif`, `#elifdef`, `#elifndef`
    Elif,
    Else,
    EndIf,
    /// `#include`, `#include_next`, `#import`
    Include,
    Define,
    /// Any other directive (`#pragma`, `#undef`, `#error`, the null directive).
    Other,
    /// Not a directive.
    #[default]
    None,
}

impl DirectiveKind {
    /// Map a directive name (the token after `#`) to its kind.
    pub fn from_name(name: &str) -> Self {
        match name {
            "if" | "ifdef" | "ifndef" => Self::If,
            "elif" | "elifdef" | "elifndef" => Self::Elif,
            "else" => Self::Else,
            "endif" => Self::EndIf,
            "include" | "include_next" | "import" => Self::Include,
            "define" => Self::Define,
            _ => Self::Other,
        }
    }

    pub fn is_directive(self) -> bool {
        self != Self::None
    }
}

/// Classification of one physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClass {
    pub directive: DirectiveKind,
    /// Only whitespace.
    pub is_blank: bool,
    /// Starts (after indentation) with `//`.
    pub is_line_comment: bool,
    /// Started inside a block comment opened on an earlier line.
    pub continues_block_comment: bool,
    /// Opens a block comment that is still unterminated at end of line.
    pub opens_block_comment: bool,
    /// Code starts with the `extern` keyword.
    pub is_extern: bool,
    /// Has non-whitespace text outside comments.
    pub has_code: bool,
}

impl LineClass {
    /// Ordinary code: something outside comments that is not a directive.
    pub fn is_code(&self) -> bool {
        self.has_code && !self.directive.is_directive()
    }

    /// Non-blank line made only of comment text.
    pub fn is_comment(&self) -> bool {
        !self.is_blank && !self.has_code
    }
}

/// Remove comment text from a line.
///
/// `in_comment` says whether the line starts inside a block comment. Returns
/// the code text (each block comment replaced by one space) and whether the
/// line ends inside a block comment.
pub fn strip_comments(line: &str, in_comment: bool) -> (String, bool) {
    let mut code = String::with_capacity(line.len());
    let mut rest = line;
    let mut in_comment = in_comment;

    loop {
        if in_comment {
            match rest.find("*/") {
                Some(pos) => {
                    rest = &rest[pos + 2..];
                    in_comment = false;
                    code.push(' ');
                }
                None => return (code, true),
            }
        } else {
            let next = match (rest.find("/*"), rest.find("//")) {
                (Some(block_at), Some(line_at)) if line_at < block_at => Some((line_at, false)),
                (Some(block_at), _) => Some((block_at, true)),
                (None, Some(line_at)) => Some((line_at, false)),
                (None, None) => None,
            };
            match next {
                None => {
                    code.push_str(rest);
                    return (code, false);
                }
                Some((pos, false)) => {
                    code.push_str(&rest[..pos]);
                    return (code, false);
                }
                Some((pos, true)) => {
                    code.push_str(&rest[..pos]);
                    rest = &rest[pos + 2..];
                    in_comment = true;
                }
            }
        }
    }
}

/// Directive name following `#` in a line of code, if the code is a directive.
fn directive_name(code: &str) -> Option<&str> {
    let after_hash = code.trim_start().strip_prefix('#')?.trim_start();
    let end = after_hash
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(after_hash.len());
    Some(&after_hash[..end])
}

fn starts_with_keyword(code: &str, keyword: &str) -> bool {
    code.strip_prefix(keyword).is_some_and(|rest| {
        rest.chars()
            .next()
            .is_none_or(|c| !(c.is_ascii_alphanumeric() || c == '_'))
    })
}

/// Classify one physical line.
///
/// Returns the classification and whether the line ends inside a block
/// comment, which is the `in_comment` input for the following line.
pub fn classify_line(line: &str, in_comment: bool) -> (LineClass, bool) {
    let trimmed = line.trim();
    let (code, ends_in_comment) = strip_comments(line, in_comment);
    let code = code.trim();

    let directive = match directive_name(code) {
        Some(name) => DirectiveKind::from_name(name),
        None => DirectiveKind::None,
    };

    let class = LineClass {
        directive,
        is_blank: trimmed.is_empty(),
        is_line_comment: !in_comment && trimmed.starts_with("//"),
        continues_block_comment: in_comment,
        opens_block_comment: ends_in_comment && (!in_comment || line.contains("*/")),
        is_extern: directive == DirectiveKind::None && starts_with_keyword(code, "extern"),
        has_code: !code.is_empty(),
    };

    (class, ends_in_comment)
}

/// Classify a whole file, threading block-comment state from line to line.
pub fn classify_lines<S: AsRef<str>>(lines: &[S]) -> Vec<LineClass> {
    let mut in_comment = false;
    lines
        .iter()
        .map(|line| {
            let (class, ends) = classify_line(line.as_ref(), in_comment);
            in_comment = ends;
            class
        })
        .collect()
}

/// Target of an `#include` line: `<a.h>`, `"a.h"` or a macro invocation.
pub fn include_target(line: &str) -> Option<&str> {
    let after_hash = line.trim_start().strip_prefix('#')?.trim_start();
    let rest = ["include_next", "include", "import"]
        .iter()
        .find_map(|kw| after_hash.strip_prefix(kw))?
        .trim_start();

    let target = match rest.chars().next()? {
        '<' => rest.find('>').map(|end| &rest[..=end]).unwrap_or(rest),
        '"' => rest[1..].find('"').map(|end| &rest[..end + 2]).unwrap_or(rest),
        _ => {
            let end = [rest.find("//"), rest.find("/*")]
                .into_iter()
                .flatten()
                .min()
                .unwrap_or(rest.len());
            &rest[..end]
        }
    };

    let target = target.trim_end();
    if target.is_empty() { None } else { Some(target) }
}
