//! Local binding names and class-level group metadata for one module.

use std::collections::HashMap;

use swc_ecma_ast::{
    CallExpr, Callee, Decorator, Expr, ImportDecl, ImportSpecifier, Lit, Module, ModuleDecl,
    ModuleExportName, ModuleItem,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::templates::GroupName;

pub const DEFAULT_I18N_NAME: &str = "i18n";
pub const DEFAULT_GROUP_NAME: &str = "i18nGroup";

/// Identifiers bound to the package's default export and its `i18nGroup` export.
///
/// Falls back to `i18n` / `i18nGroup` when the module does not import the
/// package, so scripts relying on globals are still recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportNames {
    pub i18n: String,
    pub i18n_group: String,
}

impl Default for ImportNames {
    fn default() -> Self {
        Self {
            i18n: DEFAULT_I18N_NAME.to_string(),
            i18n_group: DEFAULT_GROUP_NAME.to_string(),
        }
    }
}

impl ImportNames {
    /// Scan top-level imports whose source contains `package_name`.
    pub fn collect(module: &Module, package_name: &str) -> Self {
        let mut names = Self::default();
        for item in &module.body {
            if let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = item {
                names.collect_import(decl, package_name);
            }
        }
        names
    }

    fn collect_import(&mut self, decl: &ImportDecl, package_name: &str) {
        let Some(source) = decl.src.value.as_str() else {
            return;
        };
        if !source.contains(package_name) {
            return;
        }

        for specifier in &decl.specifiers {
            match specifier {
                ImportSpecifier::Default(default) => {
                    self.i18n = default.local.sym.to_string();
                }
                ImportSpecifier::Named(named) => {
                    let local_name = named.local.sym.to_string();
                    let imported_name = named
                        .imported
                        .as_ref()
                        .map(|i| match i {
                            ModuleExportName::Ident(ident) => ident.sym.to_string(),
                            ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
                        })
                        .unwrap_or_else(|| local_name.clone());
                    if imported_name == DEFAULT_GROUP_NAME {
                        self.i18n_group = local_name;
                    }
                }
                ImportSpecifier::Namespace(_) => {}
            }
        }
    }

    pub fn is_i18n(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Ident(ident) if ident.sym.as_str() == self.i18n)
    }

    pub fn is_i18n_group(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Ident(ident) if ident.sym.as_str() == self.i18n_group)
    }

    /// Group from the first `@i18nGroup(name)` decorator with a usable argument.
    pub fn decorator_group(&self, decorators: &[Decorator]) -> Option<GroupName> {
        decorators.iter().find_map(|decorator| match &*decorator.expr {
            Expr::Call(call) if self.is_group_call(call) => {
                call.args.first().and_then(|arg| group_argument(&arg.expr))
            }
            _ => None,
        })
    }

    fn is_group_call(&self, call: &CallExpr) -> bool {
        matches!(&call.callee, Callee::Expr(callee) if self.is_i18n_group(callee))
    }
}

/// Group named by a call argument: a non-empty string literal, or an
/// identifier taken by name.
pub fn group_argument(expr: &Expr) -> Option<GroupName> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s
            .value
            .as_str()
            .filter(|value| !value.is_empty())
            .map(|value| GroupName::Named(value.to_string())),
        Expr::Ident(ident) => Some(GroupName::from_identifier(ident.sym.as_str())),
        Expr::Paren(paren) => group_argument(&paren.expr),
        _ => None,
    }
}

/// Groups attached to class identifiers through `i18nGroup(name)(Class)`.
#[derive(Debug, Clone, Default)]
pub struct DeclarationGroups {
    groups: HashMap<String, GroupName>,
}

impl DeclarationGroups {
    pub fn collect(module: &Module, names: &ImportNames) -> Self {
        let mut collector = WrapperCallCollector {
            names,
            groups: HashMap::new(),
        };
        module.visit_with(&mut collector);
        Self {
            groups: collector.groups,
        }
    }

    pub fn get(&self, class_name: &str) -> Option<&GroupName> {
        self.groups.get(class_name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

struct WrapperCallCollector<'a> {
    names: &'a ImportNames,
    groups: HashMap<String, GroupName>,
}

impl Visit for WrapperCallCollector<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(callee) = &node.callee
            && let Expr::Call(inner) = &**callee
            && self.names.is_group_call(inner)
            && let Some(group_arg) = inner.args.first()
            && let Some(class_arg) = node.args.first()
            && let Expr::Ident(class_ident) = &*class_arg.expr
            && let Some(group) = group_argument(&group_arg.expr)
        {
            self.groups.insert(class_ident.sym.to_string(), group);
        }

        node.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use swc_common::SourceMap;

    use super::*;
    use crate::core::parsers::source::{SyntaxPlugins, parse_source};

    fn parse(code: &str) -> Module {
        parse_source(
            code.to_string(),
            "test.js",
            SyntaxPlugins::default(),
            Arc::new(SourceMap::default()),
        )
        .unwrap()
        .module
    }

    #[test]
    fn test_defaults_without_import() {
        let module = parse("i18n`Hello`");
        assert_eq!(
            ImportNames::collect(&module, "es2015-i18n-tag"),
            ImportNames::default()
        );
    }

    #[test]
    fn test_aliased_imports() {
        let module = parse("import t, { i18nGroup as group } from 'es2015-i18n-tag'");
        let names = ImportNames::collect(&module, "es2015-i18n-tag");
        assert_eq!(names.i18n, "t");
        assert_eq!(names.i18n_group, "group");
    }

    #[test]
    fn test_imports_from_other_packages_are_ignored() {
        let module = parse("import t from 'other-lib'");
        let names = ImportNames::collect(&module, "es2015-i18n-tag");
        assert_eq!(names.i18n, "i18n");
    }

    #[test]
    fn test_custom_package_name() {
        let module = parse("import tr from '@acme/i18n-tag'");
        let names = ImportNames::collect(&module, "@acme/i18n-tag");
        assert_eq!(names.i18n, "tr");
    }

    #[test]
    fn test_wrapper_call_groups() {
        let code = r#"
import i18n, { i18nGroup } from 'es2015-i18n-tag'
class Clock {}
class Other {}
export default i18nGroup(__translationGroup)(Clock)
export const wrapped = i18nGroup('named')(Other)
"#;
        let module = parse(code);
        let names = ImportNames::collect(&module, "es2015-i18n-tag");
        let groups = DeclarationGroups::collect(&module, &names);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get("Clock"), Some(&GroupName::CurrentFile));
        assert_eq!(
            groups.get("Other"),
            Some(&GroupName::Named("named".to_string()))
        );
    }

    #[test]
    fn test_group_argument() {
        let module = parse("f('name'); f(''); f(ident); f(null)");
        let args: Vec<Option<GroupName>> = module
            .body
            .iter()
            .filter_map(|item| match item {
                ModuleItem::Stmt(swc_ecma_ast::Stmt::Expr(stmt)) => match &*stmt.expr {
                    Expr::Call(call) => Some(group_argument(&call.args[0].expr)),
                    _ => None,
                },
                _ => None,
            })
            .collect();

        assert_eq!(
            args,
            vec![
                Some(GroupName::Named("name".to_string())),
                None,
                Some(GroupName::Named("ident".to_string())),
                None,
            ]
        );
    }
}
