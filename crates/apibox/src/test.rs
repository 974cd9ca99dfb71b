//! Test utilities and fixtures for apibox.
//!
//! This module provides builders for declaration nodes in the shapes the
//! reflector emits, plus a small client library tree exercising every
//! rendering path.
//!
//! # Example
//!
//! ```
//! use apibox::test::{call_signature, method, parameter};
//! use apibox::TypeDescriptor;
//!
//! let signature = call_signature(
//!     "get",
//!     vec![parameter("key", TypeDescriptor::intrinsic("string"))],
//!     Some(TypeDescriptor::intrinsic("number")),
//! );
//! let node = method("get", signature);
//! assert_eq!(node.signatures.len(), 1);
//! ```

use crate::node::{Comment, DeclarationKind, DeclarationNode};
use crate::types::TypeDescriptor;

/// Source file used by fixture declarations
pub const FIXTURE_FILE: &str = "src/client.ts";

/// Create a property with a type
pub fn property(name: &str, ty: TypeDescriptor) -> DeclarationNode {
    DeclarationNode::new(name, DeclarationKind::Property).with_type(ty)
}

/// Create a signature parameter with a type
pub fn parameter(name: &str, ty: TypeDescriptor) -> DeclarationNode {
    DeclarationNode::new(name, DeclarationKind::Other).with_type(ty)
}

/// Create a call signature. `returns` of `None` leaves the return type out.
pub fn call_signature(
    name: &str,
    parameters: Vec<DeclarationNode>,
    returns: Option<TypeDescriptor>,
) -> DeclarationNode {
    DeclarationNode {
        name: name.to_string(),
        kind: DeclarationKind::CallSignature,
        parameters,
        ty: returns,
        ..DeclarationNode::default()
    }
}

/// Create a method with one call signature
pub fn method(name: &str, signature: DeclarationNode) -> DeclarationNode {
    DeclarationNode::new(name, DeclarationKind::Method).with_signature(signature)
}

/// Create an anonymous object shape (`{ ... }`)
pub fn object_shape(children: Vec<DeclarationNode>) -> DeclarationNode {
    DeclarationNode::new("__type", DeclarationKind::Other).with_children(children)
}

/// Create an index signature `[key: K]: V`
pub fn index_signature(key: &str, key_type: TypeDescriptor, value: TypeDescriptor) -> DeclarationNode {
    DeclarationNode::new("__index", DeclarationKind::Other)
        .with_parameter(parameter(key, key_type))
        .with_type(value)
}

/// Create an interface
pub fn interface(name: &str) -> DeclarationNode {
    DeclarationNode::new(name, DeclarationKind::Interface)
}

/// Create a class (indexed like any non-member)
pub fn class(name: &str) -> DeclarationNode {
    DeclarationNode::new(name, DeclarationKind::Other)
}

/// Create a type alias
pub fn type_alias(name: &str, ty: TypeDescriptor) -> DeclarationNode {
    DeclarationNode::new(name, DeclarationKind::TypeAlias).with_type(ty)
}

/// A small HTTP client library covering constructors, methods with inline
/// and referenced options, callable properties, interfaces, index
/// signatures and plain, object and function type aliases.
pub fn client_library() -> DeclarationNode {
    let constructor = DeclarationNode::new("constructor", DeclarationKind::Constructor)
        .with_signature(call_signature(
            "new Client",
            vec![
                parameter("baseUrl", TypeDescriptor::intrinsic("string")),
                parameter("__1", TypeDescriptor::reference("RequestOptions")),
            ],
            Some(TypeDescriptor::reference("Client")),
        ))
        .with_source(FIXTURE_FILE, 20);

    let mut url = property("url", TypeDescriptor::intrinsic("string"));
    url.comment = Some(Comment {
        short_text: Some("Endpoint.".into()),
        text: Some("Endpoint to call.".into()),
    });
    let fetch = method(
        "fetch",
        call_signature(
            "fetch",
            vec![parameter(
                "options",
                TypeDescriptor::reflection(object_shape(vec![
                    url,
                    property("retries", TypeDescriptor::intrinsic("number")),
                ])),
            )],
            None,
        )
        .with_comment("Fetches."),
    )
    .with_source(FIXTURE_FILE, 42);

    let query = method(
        "query",
        call_signature(
            "query",
            vec![
                parameter("path", TypeDescriptor::intrinsic("string")),
                parameter("__1", TypeDescriptor::reference("QueryOptions")),
            ],
            Some(TypeDescriptor::generic(
                "Promise",
                vec![TypeDescriptor::reference("QueryResult")],
            )),
        )
        .with_comment("Runs a query."),
    )
    .with_source(FIXTURE_FILE, 64);

    let on_error = property(
        "onError",
        TypeDescriptor::reflection(
            object_shape(vec![]).with_signature(call_signature(
                "__type",
                vec![parameter("error", TypeDescriptor::reference("ApiError"))],
                Some(TypeDescriptor::intrinsic("void")),
            )),
        ),
    )
    .with_comment("Called on failure.");

    let close = method(
        "close",
        call_signature("close", vec![], Some(TypeDescriptor::intrinsic("void"))),
    );

    let client = class("Client")
        .with_comment("HTTP client.")
        .with_source(FIXTURE_FILE, 10)
        .with_children(vec![
            constructor,
            fetch,
            query,
            property("cache", TypeDescriptor::reference("Cache")),
            on_error,
            close,
        ]);

    let request_options = interface("RequestOptions")
        .with_comment("Options for a request.")
        .with_child(property("url", TypeDescriptor::intrinsic("string")))
        .with_child(property("headers", TypeDescriptor::reference("Headers")));

    let query_options = interface("QueryOptions")
        .with_child(property("fetchPolicy", TypeDescriptor::reference("FetchPolicy")))
        .with_child(property("variables", TypeDescriptor::reference("Variables")));

    let headers = interface("Headers").with_index_signature(index_signature(
        "key",
        TypeDescriptor::intrinsic("string"),
        TypeDescriptor::intrinsic("string"),
    ));

    let fetch_policy = type_alias(
        "FetchPolicy",
        TypeDescriptor::union(vec![
            TypeDescriptor::string_literal("cache-first"),
            TypeDescriptor::string_literal("network-only"),
        ]),
    );

    let variables = type_alias(
        "Variables",
        TypeDescriptor::reflection(object_shape(vec![
            property("id", TypeDescriptor::intrinsic("string")),
            property("limit", TypeDescriptor::intrinsic("number")),
        ])),
    );

    let handler = type_alias(
        "Handler",
        TypeDescriptor::reflection(object_shape(vec![]).with_signature(call_signature(
            "__type",
            vec![parameter("event", TypeDescriptor::intrinsic("string"))],
            Some(TypeDescriptor::intrinsic("void")),
        ))),
    );

    DeclarationNode::new("client", DeclarationKind::Other).with_children(vec![
        client,
        request_options,
        query_options,
        interface("QueryResult").with_child(property("data", TypeDescriptor::intrinsic("any"))),
        headers,
        interface("Cache").with_child(property("size", TypeDescriptor::intrinsic("number"))),
        fetch_policy,
        variables,
        handler,
    ])
}
