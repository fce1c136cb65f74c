use nalgebra::{DMatrix, DVector};

use crate::error::BuildError;
use crate::utils::sparse::SparseVec;

/// Truncated-SVD projection from term space into a k-dimensional latent
/// space (latent semantic analysis).
///
/// Fitting computes the singular value decomposition of the corpus term
/// matrix and keeps the top-k right singular vectors as the projection
/// basis. The decomposition is nalgebra's implicit-shift Golub-Kahan SVD:
/// non-randomized, singular values sorted descending, so fitting the same
/// matrix always yields the same projection without any seeding.
///
/// [`LsaReducer::fit`] is the only constructor; an unfitted reducer is
/// unrepresentable and `transform` is always valid.
#[derive(Debug, Clone)]
pub struct LsaReducer {
    /// k x vocab component matrix; row i is the i-th right singular vector.
    components: DMatrix<f64>,
}

impl LsaReducer {
    /// Learn a k-dimensional projection from a term matrix
    /// (`n_docs` rows x `vocab_size` columns).
    ///
    /// Fails with [`BuildError::InvalidComponents`] unless
    /// `1 <= k <= min(n_docs, vocab_size)`.
    pub fn fit(term_matrix: &DMatrix<f64>, k: usize) -> Result<Self, BuildError> {
        let n_docs = term_matrix.nrows();
        let vocab_size = term_matrix.ncols();
        if k == 0 || k > n_docs.min(vocab_size) {
            return Err(BuildError::InvalidComponents {
                requested: k,
                n_docs,
                vocab_size,
            });
        }

        let svd = term_matrix.clone().svd(false, true);
        let v_t = svd.v_t.expect("SVD was computed with compute_v = true");
        let components = v_t.rows(0, k).into_owned();

        Ok(Self { components })
    }

    /// Latent dimensionality k.
    #[inline]
    pub fn n_components(&self) -> usize {
        self.components.nrows()
    }

    /// Term-space dimensionality the reducer was fitted on.
    #[inline]
    pub fn input_dim(&self) -> usize {
        self.components.ncols()
    }

    /// Project a sparse term vector into the latent space.
    /// The result always has dimension k.
    pub fn transform(&self, vec: &SparseVec<f64>) -> DVector<f64> {
        debug_assert_eq!(vec.dim(), self.input_dim());
        let mut out = DVector::zeros(self.n_components());
        for (col, val) in vec.iter() {
            out.axpy(val, &self.components.column(col as usize), 1.0);
        }
        out
    }

    /// Project a dense term matrix (rows are documents) into the latent
    /// space, yielding an `n_docs` x k matrix.
    pub fn transform_matrix(&self, term_matrix: &DMatrix<f64>) -> DMatrix<f64> {
        term_matrix * self.components.transpose()
    }
}

/// Assemble a dense term matrix from sparse rows of a common dimension.
pub fn dense_from_rows(rows: &[SparseVec<f64>], dim: usize) -> DMatrix<f64> {
    let mut matrix = DMatrix::zeros(rows.len(), dim);
    for (i, row) in rows.iter().enumerate() {
        for (col, val) in row.iter() {
            matrix[(i, col as usize)] = val;
        }
    }
    matrix
}
