use super::Layout;

/// Per-operation clause assembly.
pub trait ClauseAssembler {
    /// Ordered, non-empty clause strings.
    fn clauses(&self) -> Vec<String>;

    /// Join the clauses under `layout`.
    fn render(&self, layout: Layout) -> String {
        layout.join(&self.clauses())
    }
}
