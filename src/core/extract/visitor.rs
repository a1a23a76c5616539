//! Single-pass AST visitor collecting tagged templates and `translate(...)` keys.

use std::collections::HashSet;

use serde_json::Value;
use swc_common::{BytePos, Spanned};
use swc_ecma_ast::{
    CallExpr, Callee, Class, ClassDecl, ClassExpr, Expr, Lit, MemberExpr, MemberProp, Module,
    TaggedTpl,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::canonical::canonicalize;
use super::imports::{DeclarationGroups, ImportNames, group_argument};
use crate::core::parsers::source::ParsedSource;
use crate::core::templates::{
    GroupName, TemplatePatterns, TranslationEntry, pattern_from_key, placeholder_pattern,
};

/// How the group of a recognized call site is decided.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TagGroup {
    /// Bare `i18n` tag: always ungrouped.
    Ungrouped,
    /// `this.i18n` or an argument-less call: takes the enclosing class group.
    Inherited,
    /// `i18n('group')`: the argument wins over any class group.
    Inline(Option<GroupName>),
}

/// Raw output of one file's traversal.
#[derive(Debug, Default)]
pub struct ExtractionResult {
    pub entries: Vec<TranslationEntry>,
    pub patterns: TemplatePatterns,
    pub warnings: Vec<String>,
}

pub struct TemplateExtractor<'a> {
    source: &'a ParsedSource,
    names: &'a ImportNames,
    declaration_groups: &'a DeclarationGroups,
    /// Group of each enclosing class, innermost last.
    class_groups: Vec<Option<GroupName>>,
    seen: HashSet<TranslationEntry>,
    result: ExtractionResult,
}

impl<'a> TemplateExtractor<'a> {
    pub fn new(
        source: &'a ParsedSource,
        names: &'a ImportNames,
        declaration_groups: &'a DeclarationGroups,
    ) -> Self {
        Self {
            source,
            names,
            declaration_groups,
            class_groups: Vec::new(),
            seen: HashSet::new(),
            result: ExtractionResult::default(),
        }
    }

    pub fn extract(mut self, module: &Module) -> ExtractionResult {
        self.visit_module(module);
        self.result
    }

    fn current_class_group(&self) -> Option<GroupName> {
        self.class_groups.last().cloned().flatten()
    }

    fn with_class<F>(&mut self, class_name: Option<&str>, class: &Class, f: F)
    where
        F: FnOnce(&mut Self),
    {
        let group = self
            .names
            .decorator_group(&class.decorators)
            .or_else(|| class_name.and_then(|name| self.declaration_groups.get(name).cloned()))
            .or_else(|| self.current_class_group());
        self.class_groups.push(group);
        f(self);
        self.class_groups.pop();
    }

    fn entry_for(&self, group: &TagGroup, value: String) -> TranslationEntry {
        let group = match group {
            TagGroup::Ungrouped => None,
            TagGroup::Inherited => self.current_class_group(),
            TagGroup::Inline(group) => group.clone(),
        };
        match group {
            Some(group) => TranslationEntry::Grouped { group, value },
            None => TranslationEntry::Key(value),
        }
    }

    /// Record an entry once; the pattern is registered only on first sight.
    fn record(&mut self, entry: TranslationEntry, pattern: Option<String>) {
        if entry.value().is_empty() || !self.seen.insert(entry.clone()) {
            return;
        }
        if let Some(pattern) = pattern {
            self.result.patterns.insert(entry.value(), pattern);
        }
        self.result.entries.push(entry);
    }

    fn is_i18n_member(member: &MemberExpr) -> bool {
        matches!(&member.prop, MemberProp::Ident(prop) if prop.sym.as_str() == "i18n")
    }

    /// `i18n(...)` or `<obj>.i18n(...)` used as a tag or as a `translate` receiver.
    fn call_group(&self, call: &CallExpr) -> Option<TagGroup> {
        let Callee::Expr(callee) = &call.callee else {
            return None;
        };
        let recognized = match &**callee {
            Expr::Member(member) => Self::is_i18n_member(member),
            expr => self.names.is_i18n(expr),
        };
        if !recognized {
            return None;
        }
        Some(match call.args.first() {
            Some(arg) => TagGroup::Inline(group_argument(&arg.expr)),
            None => TagGroup::Inherited,
        })
    }

    fn tag_group(&self, tag: &Expr) -> Option<TagGroup> {
        match tag {
            Expr::Ident(_) if self.names.is_i18n(tag) => Some(TagGroup::Ungrouped),
            Expr::Member(member) if Self::is_i18n_member(member) => Some(TagGroup::Inherited),
            Expr::Call(call) => self.call_group(call),
            Expr::Paren(paren) => self.tag_group(&paren.expr),
            _ => None,
        }
    }

    /// Receiver of `.translate(...)`: `i18n`, `i18n('group')` or `this.i18n`.
    fn translate_group(&self, receiver: &Expr) -> Option<TagGroup> {
        match receiver {
            Expr::Ident(_) if self.names.is_i18n(receiver) => Some(TagGroup::Inherited),
            Expr::Call(call) => self.call_group(call),
            Expr::Member(member)
                if matches!(&*member.obj, Expr::This(_)) && Self::is_i18n_member(member) =>
            {
                Some(TagGroup::Inherited)
            }
            _ => None,
        }
    }

    fn collect_template(&mut self, node: &TaggedTpl, group: TagGroup) {
        let body = self.source.template_body(&node.tpl);
        let expressions: Vec<String> = node
            .tpl
            .exprs
            .iter()
            .map(|expr| self.source.snippet(expr.span()))
            .collect();

        match canonicalize(&body, &expressions) {
            Ok(canonical) => {
                let entry = self.entry_for(&group, canonical.key);
                self.record(entry, placeholder_pattern(canonical.placeholders));
            }
            Err(err) => self.result.warnings.push(format!("{:#}", err)),
        }
    }

    fn collect_translate_call(&mut self, node: &CallExpr, group: TagGroup) {
        let Some(arg) = node.args.first() else {
            return;
        };
        let keys = match &*arg.expr {
            Expr::Lit(Lit::Str(s)) => s
                .value
                .as_str()
                .map(|value| vec![value.to_string()])
                .unwrap_or_default(),
            Expr::Ident(ident) => {
                let limit = node
                    .args
                    .get(1)
                    .map(|next| next.span().lo)
                    .unwrap_or(node.span.hi);
                self.documented_keys(ident.span.hi, limit)
            }
            _ => Vec::new(),
        };

        for key in keys {
            let pattern = pattern_from_key(&key);
            let entry = self.entry_for(&group, key);
            self.record(entry, pattern);
        }
    }

    /// Keys documented in a comment after a dynamic key: `t(x /* ["a", "b"] */)`.
    fn documented_keys(&self, after: BytePos, limit: BytePos) -> Vec<String> {
        let Some(comment) = self.source.comments.first_after(after, limit) else {
            return Vec::new();
        };
        match serde_json::from_str::<Value>(comment.text.trim()) {
            Ok(Value::String(key)) => vec![key],
            Ok(Value::Array(values)) => values
                .into_iter()
                .filter_map(|value| match value {
                    Value::String(key) => Some(key),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Visit for TemplateExtractor<'_> {
    fn visit_class_decl(&mut self, node: &ClassDecl) {
        let name = node.ident.sym.to_string();
        self.with_class(Some(&name), &node.class, |this| {
            node.visit_children_with(this);
        });
    }

    fn visit_class_expr(&mut self, node: &ClassExpr) {
        let name = node.ident.as_ref().map(|ident| ident.sym.to_string());
        self.with_class(name.as_deref(), &node.class, |this| {
            node.visit_children_with(this);
        });
    }

    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        if let Some(group) = self.tag_group(&node.tag) {
            self.collect_template(node, group);
        }

        // Interpolations may hold nested tagged templates.
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(callee) = &node.callee
            && let Expr::Member(member) = &**callee
            && let MemberProp::Ident(method) = &member.prop
            && method.sym.as_str() == "translate"
            && let Some(group) = self.translate_group(&member.obj)
        {
            self.collect_translate_call(node, group);
        }

        node.visit_children_with(self);
    }
}
