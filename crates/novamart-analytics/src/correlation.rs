//! Correlation matrix access.

use novamart_domain::CorrelationMatrix;

/// Hands the loaded matrix to the presentation layer unchanged. Shape,
/// symmetry and diagonal are checked when the matrix is loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationProvider;

impl CorrelationProvider {
    #[must_use]
    pub const fn get(matrix: &CorrelationMatrix) -> &CorrelationMatrix {
        matrix
    }
}
