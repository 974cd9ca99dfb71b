//! Symbol renderer
//!
//! Turns one indexed declaration into a [`RenderModel`]: its parameters
//! split into positional arguments and an unwrapped options object, its
//! one-line signature, summary and, for plain type aliases, a flat type.
//!
//! Type strings are derived recursively. References to plain type
//! aliases are inlined, every other reference becomes an in-page link.
//! Anything that cannot be named renders as `any` with a warning, so one
//! odd declaration never stops the build.

use crate::config::{ApiBoxConfig, DEFAULT_MAX_DEPTH};
use crate::diagnostics::{codes, ApiBoxError, ApiBoxResult, Diagnostic, DiagnosticsCollector};
use crate::index::{IndexEntry, SymbolIndex};
use crate::links::{expand_doc_links, link};
use crate::model::{Group, GroupKind, RenderModel, TemplateOptions};
use crate::node::{Comment, DeclarationKind, DeclarationNode};
use crate::params::{delimited, parameter_name, Member, OPTIONS_PARAMETER_NAME};
use crate::types::TypeDescriptor;
use serde_json::{Map, Value};

/// Placeholder for types that cannot be named
pub const ANY_TYPE: &str = "any";

/// Return type left out of signatures
const VOID_TYPE: &str = "void";

/// Resolution state for one `render_symbol` call
struct Scope<'d> {
    /// Symbol being rendered
    symbol: String,
    file: Option<String>,
    line: Option<usize>,
    /// Type aliases currently being inlined, outermost first
    aliases: Vec<String>,
    depth: usize,
    max_depth: usize,
    diagnostics: &'d mut DiagnosticsCollector,
}

impl<'d> Scope<'d> {
    fn new(
        entry: &IndexEntry<'_>,
        max_depth: usize,
        diagnostics: &'d mut DiagnosticsCollector,
    ) -> Self {
        let source = entry.node.source();
        Self {
            symbol: entry.id().to_string(),
            file: source.map(|s| s.file_name.clone()),
            line: source.map(|s| s.line),
            aliases: vec![entry.id().to_string()],
            depth: 0,
            max_depth,
            diagnostics,
        }
    }

    fn locate(&self, diagnostic: Diagnostic) -> Diagnostic {
        let diagnostic = diagnostic.for_symbol(self.symbol.clone());
        match (&self.file, self.line) {
            (Some(file), Some(line)) => diagnostic.at(file.clone(), line),
            _ => diagnostic,
        }
    }

    fn warn(&mut self, code: &'static str, message: impl Into<String>) {
        let diagnostic = self.locate(Diagnostic::warning(message).with_code(code));
        self.diagnostics.add(diagnostic);
    }

    fn fail(&mut self, err: &ApiBoxError) {
        let diagnostic = self.locate(Diagnostic::from_error(err));
        self.diagnostics.add(diagnostic);
    }

    fn descend(&mut self) -> ApiBoxResult<()> {
        if self.depth >= self.max_depth {
            return Err(ApiBoxError::DepthExceeded {
                symbol: self.symbol.clone(),
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }
}

/// Renders API boxes from a symbol index
///
/// # Example
///
/// ```
/// use apibox::{DiagnosticsCollector, Renderer, SymbolIndex};
/// use apibox::test::client_library;
///
/// let tree = client_library();
/// let index = SymbolIndex::build(&tree);
/// let renderer = Renderer::new(&index);
///
/// let mut diagnostics = DiagnosticsCollector::new();
/// let model = renderer.render_symbol("Client.close", &mut diagnostics).unwrap();
/// assert_eq!(model.signature, "close()");
/// ```
#[derive(Debug, Clone)]
pub struct Renderer<'i, 'a> {
    index: &'i SymbolIndex<'a>,
    repo: Option<String>,
    max_depth: usize,
    expand_links: bool,
}

impl<'i, 'a> Renderer<'i, 'a> {
    /// Create a renderer with default settings
    pub fn new(index: &'i SymbolIndex<'a>) -> Self {
        Self {
            index,
            repo: None,
            max_depth: DEFAULT_MAX_DEPTH,
            expand_links: false,
        }
    }

    /// Create a renderer from build configuration
    pub fn from_config(index: &'i SymbolIndex<'a>, config: &ApiBoxConfig) -> Self {
        Self {
            index,
            repo: config.repo.clone(),
            max_depth: config.max_depth.max(1),
            expand_links: config.expand_links,
        }
    }

    /// Set the repository slug
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Set the limit on nested type derivations
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Enable or disable `{@link Name}` expansion
    pub fn with_expanded_links(mut self, enable: bool) -> Self {
        self.expand_links = enable;
        self
    }

    /// Render the symbol indexed under `name`.
    ///
    /// Failures are scoped to this symbol: each one is reported to
    /// `diagnostics` exactly once and returned as the error.
    pub fn render_symbol(
        &self,
        name: &str,
        diagnostics: &mut DiagnosticsCollector,
    ) -> ApiBoxResult<RenderModel> {
        let Some(entry) = self.index.get(name) else {
            let err = ApiBoxError::SymbolNotFound(name.to_string());
            diagnostics.add(
                Diagnostic::warning(err.to_string())
                    .for_symbol(name)
                    .with_code(err.code()),
            );
            return Err(err);
        };

        tracing::trace!(symbol = name, kind = entry.node.kind.display_name(), "Rendering api box");
        let mut scope = Scope::new(entry, self.max_depth, diagnostics);
        match self.render_entry(entry, &mut scope) {
            Ok(model) => Ok(model),
            Err(err) => {
                scope.fail(&err);
                Err(err)
            }
        }
    }

    /// Template context for `name` with `options` laid over it.
    ///
    /// Returns an empty map when the symbol cannot be rendered.
    pub fn template_context(
        &self,
        name: &str,
        options: &TemplateOptions,
        diagnostics: &mut DiagnosticsCollector,
    ) -> Map<String, Value> {
        let Ok(model) = self.render_symbol(name, diagnostics) else {
            return Map::new();
        };
        match model.into_context(options) {
            Ok(context) => context,
            Err(err) => {
                diagnostics.add(Diagnostic::from_error(&err).for_symbol(name));
                Map::new()
            }
        }
    }

    fn render_entry(&self, entry: &IndexEntry<'a>, scope: &mut Scope<'_>) -> ApiBoxResult<RenderModel> {
        let node = entry.node;
        let parameters = self.parameters(node, scope)?;
        let signature = self.signature(node, &parameters, scope)?;

        let (options, positional): (Vec<Member>, Vec<Member>) =
            parameters.into_iter().partition(|p| p.is_options);

        let mut groups = vec![];
        if !positional.is_empty() {
            groups.push(Group::new(GroupKind::Arguments, positional));
        }

        let mut options = options.into_iter();
        if let Some(first) = options.next() {
            let dropped = options.count();
            if dropped > 0 {
                scope.warn(
                    codes::AMBIGUOUS_OPTIONS,
                    format!(
                        "{} more parameter(s) resolved to `{}`, only the first is documented",
                        dropped, OPTIONS_PARAMETER_NAME
                    ),
                );
            }
            // the options object is listed field by field
            groups.push(Group::new(GroupKind::Options, first.properties));
        }

        let mut ty = None;
        match node.kind {
            DeclarationKind::Interface => {
                groups.push(Group::new(
                    GroupKind::Properties,
                    self.object_properties(node, scope)?,
                ));
            }
            DeclarationKind::TypeAlias => match node.object_shape() {
                Some(shape) => groups.push(Group::new(
                    GroupKind::Properties,
                    self.object_properties(shape, scope)?,
                )),
                None => ty = Some(self.type_of(node, false, scope)?),
            },
            _ => {}
        }

        let source = node.source();
        Ok(RenderModel {
            id: entry.id().to_string(),
            name: node.name.clone(),
            ty,
            signature,
            summary: self.summary(node),
            groups,
            repo: self.repo.clone(),
            source_file: source.map(|s| s.file_name.clone()),
            source_line: source.map(|s| s.line),
        })
    }

    /// Parameters of a function-like declaration
    fn parameters(&self, node: &DeclarationNode, scope: &mut Scope<'_>) -> ApiBoxResult<Vec<Member>> {
        if node.is_reflected_property() {
            return match node.reflected_declaration() {
                Some(declaration) => self.parameters(declaration, scope),
                None => Ok(vec![]),
            };
        }

        let Some(signature) = node.first_signature() else {
            return Ok(vec![]);
        };
        signature
            .parameters
            .iter()
            .map(|param| self.parameter(param, scope))
            .collect()
    }

    fn parameter(&self, param: &DeclarationNode, scope: &mut Scope<'_>) -> ApiBoxResult<Member> {
        let name = parameter_name(param);

        let properties = match &param.ty {
            Some(TypeDescriptor::Reflection {
                declaration: Some(declaration),
            }) => self.members(&declaration.children, scope)?,
            Some(TypeDescriptor::Reference { name: target, .. }) => match self.index.node(target) {
                Some(referenced) => self.members(&referenced.children, scope)?,
                None => vec![],
            },
            _ => vec![],
        };

        let mut member = self.member(param, scope)?;
        member.is_options = name == OPTIONS_PARAMETER_NAME;
        member.optional = param.default_value.is_some();
        member.name = name;
        member.properties = properties;
        Ok(member)
    }

    fn members(&self, nodes: &[DeclarationNode], scope: &mut Scope<'_>) -> ApiBoxResult<Vec<Member>> {
        nodes.iter().map(|node| self.member(node, scope)).collect()
    }

    fn member(&self, node: &DeclarationNode, scope: &mut Scope<'_>) -> ApiBoxResult<Member> {
        let mut member = Member::new(node.name.clone(), self.type_of(node, false, scope)?);
        member.description = node
            .comment
            .as_ref()
            .and_then(Comment::description)
            .map(|text| self.doc_text(text));
        Ok(member)
    }

    /// Index signatures first, then named properties
    fn object_properties(
        &self,
        node: &DeclarationNode,
        scope: &mut Scope<'_>,
    ) -> ApiBoxResult<Vec<Member>> {
        let mut members = Vec::with_capacity(node.index_signature.len() + node.children.len());
        for signature in &node.index_signature {
            let mut member = self.member(signature, scope)?;
            member.name = self.index_parameters(signature, scope)?;
            members.push(member);
        }
        members.extend(self.members(&node.children, scope)?);
        Ok(members)
    }

    /// `[key:string]`
    fn index_parameters(
        &self,
        signature: &DeclarationNode,
        scope: &mut Scope<'_>,
    ) -> ApiBoxResult<String> {
        let mut parts = Vec::with_capacity(signature.parameters.len());
        for param in &signature.parameters {
            let name = match &param.ty {
                Some(ty) => self.type_name(ty, scope)?,
                None => None,
            };
            let name = match name {
                Some(name) => name,
                None => self.unresolved(param, scope),
            };
            parts.push(format!("{}:{}", param.name, name));
        }
        Ok(delimited(&parts, "[", "]"))
    }

    fn signature(
        &self,
        node: &DeclarationNode,
        parameters: &[Member],
        scope: &mut Scope<'_>,
    ) -> ApiBoxResult<String> {
        let callable = if node.is_reflected_property() {
            node.reflected_declaration().unwrap_or(node)
        } else {
            node
        };

        let Some(signature) = callable.first_signature() else {
            return Ok(html_escape::encode_safe(&node.name).into_owned());
        };

        let names: Vec<&str> = parameters.iter().map(|p| p.name.as_str()).collect();
        let mut result = format!("{}{}", node.name, delimited(&names, "(", ")"));

        if node.kind != DeclarationKind::Constructor && signature.ty.is_some() {
            let return_type = self.type_of(signature, true, scope)?;
            if return_type != VOID_TYPE {
                result.push_str(": ");
                result.push_str(&return_type);
            }
        }
        Ok(result)
    }

    fn summary(&self, node: &DeclarationNode) -> Option<String> {
        node.short_text()
            .or_else(|| node.first_signature().and_then(DeclarationNode::short_text))
            .map(|text| self.doc_text(text))
    }

    fn doc_text(&self, text: &str) -> String {
        if self.expand_links {
            expand_doc_links(text)
        } else {
            text.to_string()
        }
    }

    /// Rendered type of a declaration
    fn type_of(
        &self,
        node: &DeclarationNode,
        skip_signature: bool,
        scope: &mut Scope<'_>,
    ) -> ApiBoxResult<String> {
        scope.descend()?;
        let result = self.derive_type(node, skip_signature, scope);
        scope.ascend();
        result
    }

    fn derive_type(
        &self,
        node: &DeclarationNode,
        skip_signature: bool,
        scope: &mut Scope<'_>,
    ) -> ApiBoxResult<String> {
        if node.kind == DeclarationKind::Method {
            let Some(signature) = node.first_signature() else {
                scope.warn(
                    codes::MALFORMED_INPUT,
                    format!("method '{}' has no call signature, using the type name `{}`", node.name, ANY_TYPE),
                );
                return Ok(ANY_TYPE.to_string());
            };
            return self.type_of(signature, false, scope);
        }

        if node.kind == DeclarationKind::CallSignature && !skip_signature {
            let mut arguments = Vec::with_capacity(node.parameters.len());
            for param in &node.parameters {
                arguments.push(self.type_of(param, false, scope)?);
            }
            let returns = self.type_of(node, true, scope)?;
            return Ok(format!("{} => {}", delimited(&arguments, "(", ")"), returns));
        }

        if let Some(declaration) = node.reflected_declaration() {
            if let Some(signature) = declaration.first_signature() {
                return self.type_of(signature, false, scope);
            }
            if let Some(index) = declaration.index_signature.first() {
                let key = self.index_parameters(index, scope)?;
                return Ok(format!("{}:{}", key, self.type_of(index, false, scope)?));
            }
        }

        let Some(ty) = node.ty.as_ref() else {
            return Ok(self.unresolved(node, scope));
        };
        let name = match self.type_name(ty, scope)? {
            Some(name) => name,
            None => self.unresolved(node, scope),
        };

        let type_arguments = ty.type_arguments();
        if type_arguments.is_empty() {
            return Ok(name);
        }
        let mut arguments = Vec::with_capacity(type_arguments.len());
        for argument in type_arguments {
            let argument = match self.type_name(argument, scope)? {
                Some(argument) => argument,
                None => self.unresolved(node, scope),
            };
            arguments.push(argument);
        }
        Ok(format!("{}{}", name, delimited(&arguments, "<", ">")))
    }

    fn unresolved(&self, node: &DeclarationNode, scope: &mut Scope<'_>) -> String {
        scope.warn(
            codes::UNRESOLVED_TYPE,
            format!("unknown type name for '{}', using the type name `{}`", node.name, ANY_TYPE),
        );
        ANY_TYPE.to_string()
    }

    /// Name of a type descriptor, or `None` when it has no one-line name.
    /// A union with any unnameable member is itself unnameable.
    fn type_name(&self, ty: &TypeDescriptor, scope: &mut Scope<'_>) -> ApiBoxResult<Option<String>> {
        Ok(match ty {
            TypeDescriptor::Intrinsic { name, .. } | TypeDescriptor::Reference { name, .. }
                if name.is_empty() =>
            {
                None
            }
            TypeDescriptor::Intrinsic { name, is_array } => Some(if *is_array {
                format!("[{}]", name)
            } else {
                name.clone()
            }),
            TypeDescriptor::Union { types } => {
                let mut names = Vec::with_capacity(types.len());
                for member in types {
                    match self.type_name(member, scope)? {
                        Some(name) => names.push(name),
                        None => return Ok(None),
                    }
                }
                Some(names.join(" | "))
            }
            TypeDescriptor::Reference { name, .. } => Some(self.reference_name(name, scope)?),
            TypeDescriptor::StringLiteral { value } => Some(format!("\"{}\"", value)),
            TypeDescriptor::Reflection { .. } | TypeDescriptor::Unknown => None,
        })
    }

    fn reference_name(&self, name: &str, scope: &mut Scope<'_>) -> ApiBoxResult<String> {
        let Some(entry) = self.index.get(name) else {
            return Ok(link(name, name));
        };
        // plain aliases read better inline than as a link
        if entry.node.kind == DeclarationKind::TypeAlias && entry.node.object_shape().is_none() {
            return self.inline_alias(entry, scope);
        }
        Ok(link(entry.id(), name))
    }

    fn inline_alias(&self, entry: &IndexEntry<'a>, scope: &mut Scope<'_>) -> ApiBoxResult<String> {
        let id = entry.id().to_string();
        if scope.aliases.contains(&id) {
            let mut chain = scope.aliases.clone();
            chain.push(id);
            return Err(ApiBoxError::ReferenceCycle {
                symbol: scope.symbol.clone(),
                chain,
            });
        }

        scope.aliases.push(id);
        let result = self.type_of(entry.node, false, scope);
        scope.aliases.pop();
        result
    }
}
