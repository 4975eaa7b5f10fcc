//! A parser for the GraphQL query language.
//!
//! This crate parses GraphQL documents — operations, fragments, selection
//! sets, field arguments, and literal values — into a strongly-typed AST
//! for tools that analyze or transform queries (editors, linters, codegen).
//! It performs no schema validation, execution, or introspection.
//!
//! # Usage
//!
//! ```
//! use graphql_syntax::Parser;
//!
//! let source = r#"
//!     fragment MyUser on User {
//!         firstname
//!         lastname
//!     }
//!
//!     query MyQuery {
//!         post(id: 42) {
//!             text
//!             author {
//!                 ...MyUser
//!             }
//!         }
//!     }
//! "#;
//!
//! let root = Parser::new(source).parse_document()?;
//! assert_eq!(root.fragments.len(), 1);
//! assert_eq!(root.operations.len(), 1);
//! # Ok::<(), graphql_syntax::SyntaxError>(())
//! ```
//!
//! Parsing either succeeds with a complete [`ast::Root`] or fails with a
//! single [`SyntaxError`]; there is no partial result and no recovery.
//! Every AST node implements `Display` (re-serializing to GraphQL text)
//! and serde's `Serialize`/`Deserialize`.
//!
//! Parsing is synchronous and shares no state: each [`Parser`] owns its
//! own cursor, so documents can be parsed concurrently on different
//! threads without locking.

pub mod ast;
mod lexer;
mod parser;
mod print;
mod source_position;
mod source_span;
mod syntax_error;
mod token;

pub use lexer::Lexer;
pub use parser::Parser;
pub use source_position::SourcePosition;
pub use source_span::SourceSpan;
pub use syntax_error::SyntaxError;
pub use token::Token;
pub use token::TokenKind;

#[cfg(test)]
mod tests;
