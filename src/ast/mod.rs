/// Parse tree module
/// Contains the arena tree produced by the parser and its views
///
/// Submodules:
/// - ast: Arena, node and token views, renderings
/// - contexts: Typed accessors on rule contexts
/// - kinds: Node kinds, rule contexts and the listener trait
/// - render: Dump, S-expression and JSON writers driven by the walker
/// - walker: Depth-first listener traversal
pub mod ast;
pub mod contexts;
pub mod kinds;
mod render;
pub mod walker;

#[cfg(test)]
mod tests;
