use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use swc_common::{
    BytePos, FileName, Globals, SourceMap, SourceMapper, Span,
    comments::{Comment, SingleThreadedComments},
};
use swc_ecma_ast::{Module, Tpl};
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// Map of byte positions to comments.
pub type CommentMap = HashMap<BytePos, Vec<Comment>>;

/// Thread-safe extracted comments from SingleThreadedComments.
/// Extracted during parsing and stored independently of swc types.
#[derive(Debug, Clone, Default)]
pub struct ExtractedComments {
    pub leading: CommentMap,
    pub trailing: CommentMap,
}

impl ExtractedComments {
    /// Extract comments from SingleThreadedComments.
    /// This must be called before SingleThreadedComments is dropped.
    pub fn from_swc(comments: &SingleThreadedComments) -> Self {
        let (leading, trailing) = comments.borrow_all();
        Self {
            leading: leading.iter().map(|(k, v)| (*k, v.clone())).collect(),
            trailing: trailing.iter().map(|(k, v)| (*k, v.clone())).collect(),
        }
    }

    /// First comment that follows `pos` and starts before `limit` (exclusive).
    ///
    /// swc attaches a comment on the same line as trailing to the previous
    /// token, and otherwise as leading to the next one; both are checked.
    pub fn first_after(&self, pos: BytePos, limit: BytePos) -> Option<&Comment> {
        if let Some(comment) = self.trailing.get(&pos).and_then(|c| c.first()) {
            return Some(comment);
        }
        self.leading
            .iter()
            .filter(|(at, _)| **at >= pos && **at < limit)
            .min_by_key(|(at, _)| **at)
            .and_then(|(_, comments)| comments.first())
    }
}

/// Grammar plugins handed to the parser.
///
/// All plugins are enabled by default so that modern syntax parses without
/// configuration. TypeScript is additionally switched on for `.ts`/`.tsx` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxPlugins {
    pub jsx: bool,
    pub decorators: bool,
    pub typescript: bool,
}

impl Default for SyntaxPlugins {
    fn default() -> Self {
        Self {
            jsx: true,
            decorators: true,
            typescript: false,
        }
    }
}

impl SyntaxPlugins {
    /// Plugins to use for a given file, turning TypeScript on by extension.
    pub fn for_file(&self, file_path: &Path) -> Self {
        let is_typescript = matches!(
            file_path.extension().and_then(|e| e.to_str()),
            Some("ts" | "tsx" | "mts" | "cts")
        );
        Self {
            typescript: self.typescript || is_typescript,
            ..*self
        }
    }

    fn syntax(&self) -> Syntax {
        if self.typescript {
            Syntax::Typescript(TsSyntax {
                tsx: self.jsx,
                decorators: self.decorators,
                ..Default::default()
            })
        } else {
            Syntax::Es(EsSyntax {
                jsx: self.jsx,
                decorators: self.decorators,
                decorators_before_export: true,
                ..Default::default()
            })
        }
    }
}

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub comments: ExtractedComments,
}

impl ParsedSource {
    /// Exact source text covered by `span`.
    pub fn snippet(&self, span: Span) -> String {
        self.source_map.span_to_snippet(span).unwrap_or_default()
    }

    /// Raw text between the backticks of a template literal.
    pub fn template_body(&self, tpl: &Tpl) -> String {
        let raw = self.snippet(tpl.span);
        let inner = raw.strip_prefix('`').unwrap_or(&raw);
        inner.strip_suffix('`').unwrap_or(inner).to_string()
    }
}

/// Parse JavaScript/TypeScript source code into an AST.
///
/// Accepts a shared SourceMap for thread-safe parallel parsing.
pub fn parse_source(
    code: String,
    file_path: &str,
    plugins: SyntaxPlugins,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            plugins.syntax(),
            StringInput::from(&*source_file),
            Some(&comments),
        );

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        // Recoverable errors still mean the file is not valid source.
        let errors = parser.take_errors();
        if !errors.is_empty() {
            let details: Vec<String> = errors.iter().map(|e| format!("{:?}", e)).collect();
            return Err(anyhow!("Failed to parse {}: {}", file_path, details.join(", ")));
        }

        // Extract comments immediately (before SingleThreadedComments drops)
        let extracted_comments = ExtractedComments::from_swc(&comments);

        Ok(ParsedSource {
            module,
            source_map,
            comments: extracted_comments,
        })
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn parse(code: &str, path: &str) -> Result<ParsedSource> {
        let plugins = SyntaxPlugins::default().for_file(&PathBuf::from(path));
        parse_source(code.to_string(), path, plugins, Arc::new(SourceMap::default()))
    }

    #[test]
    fn test_parse_decorated_class() {
        let code = r#"
import i18n, { i18nGroup } from 'es2015-i18n-tag'

@i18nGroup('group')
export class Test {}
"#;
        let parsed = parse(code, "test.js").unwrap();
        assert_eq!(parsed.module.body.len(), 2);
    }

    #[test]
    fn test_parse_jsx() {
        let parsed = parse("const a = <div>{i18n`Hello`}</div>", "app.jsx");
        assert!(parsed.is_ok());
    }

    #[test]
    fn test_parse_typescript_by_extension() {
        let code = "const name: string = 'x'; i18n`Hello ${name}`";
        assert!(parse(code, "app.ts").is_ok());
        assert!(parse(code, "app.js").is_err());
    }

    #[test]
    fn test_parse_error() {
        let result = parse("const = ;", "broken.js");
        assert!(result.is_err());
        assert!(result.err().unwrap().to_string().contains("broken.js"));
    }

    #[test]
    fn test_recoverable_errors_fail_the_parse() {
        let result = parse("i18n`Hello`; function f(a, a) { 'use strict' }", "strict.js");
        assert!(result.is_err());
        assert!(result.err().unwrap().to_string().starts_with("Failed to parse strict.js"));
    }

    #[test]
    fn test_first_after_stops_at_limit() {
        let mut comments = ExtractedComments::default();
        let comment = Comment {
            kind: swc_common::comments::CommentKind::Block,
            span: Span::new(BytePos(20), BytePos(27)),
            text: "\"k\"".into(),
        };
        comments.leading.insert(BytePos(28), vec![comment]);

        assert!(comments.first_after(BytePos(10), BytePos(28)).is_none());
        assert!(comments.first_after(BytePos(10), BytePos(29)).is_some());
    }

    #[test]
    fn test_plugins_for_file() {
        let plugins = SyntaxPlugins::default();
        assert!(!plugins.for_file(&PathBuf::from("a.js")).typescript);
        assert!(plugins.for_file(&PathBuf::from("a.tsx")).typescript);
    }
}
