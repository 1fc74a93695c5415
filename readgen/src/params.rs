use crate::{Error, Result};

/// Parameters controlling reference and read generation.
///
/// [`Default`] gives the standard data set: a 100 Mb reference, 20 million 50 bp reads at
/// stride 5, one in ten reads carrying one or two substitutions.
#[derive(Debug, Clone, PartialEq)]
pub struct SimParams {
    /// Length of the random reference
    pub reference_length: usize,
    /// Number of reads to attempt, fewer are produced when the reference runs out
    pub read_count: usize,
    /// Length of every read
    pub read_length: usize,
    /// Offset between consecutive read starts
    pub stride: usize,
    /// Probability of a read being mutated
    pub mutation_rate: f64,
    /// Smallest number of substitutions applied to a mutated read
    pub min_mutations: usize,
    /// Largest number of substitutions applied to a mutated read
    pub max_mutations: usize,
    /// Bases per line in the reference output
    pub line_width: usize,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            reference_length: crate::DEFAULT_REFERENCE_LENGTH,
            read_count: crate::DEFAULT_READ_COUNT,
            read_length: crate::DEFAULT_READ_LENGTH,
            stride: crate::DEFAULT_STRIDE,
            mutation_rate: crate::DEFAULT_MUTATION_RATE,
            min_mutations: crate::DEFAULT_MIN_MUTATIONS,
            max_mutations: crate::DEFAULT_MAX_MUTATIONS,
            line_width: crate::DEFAULT_LINE_WIDTH,
        }
    }
}

impl SimParams {
    /// Rejects parameter combinations that cannot produce well formed output
    pub fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            return Err(Error::ZeroStride);
        }
        if self.read_length == 0 {
            return Err(Error::ZeroReadLength);
        }
        if self.line_width == 0 {
            return Err(Error::ZeroLineWidth);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::InvalidMutationRate(self.mutation_rate));
        }
        if self.min_mutations > self.max_mutations {
            return Err(Error::InvalidMutationRange(
                self.min_mutations,
                self.max_mutations,
            ));
        }
        Ok(())
    }

    /// Last start position a full read fits at, `None` when the reference is shorter than a read
    pub fn max_start(&self) -> Option<usize> {
        self.reference_length.checked_sub(self.read_length)
    }

    /// Number of reads generation will produce: `min(M, (N - L) / stride + 1)`
    pub fn expected_read_count(&self) -> usize {
        match self.max_start() {
            Some(max_start) if self.stride > 0 => {
                std::cmp::min(self.read_count, max_start / self.stride + 1)
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> SimParams {
        SimParams {
            reference_length: 10,
            read_count: 3,
            read_length: 5,
            stride: 2,
            ..Default::default()
        }
    }

    #[test]
    fn defaults_match_standard_data_set() {
        let params = SimParams::default();
        assert_eq!(params.reference_length, 100_000_000);
        assert_eq!(params.read_count, 20_000_000);
        assert_eq!(params.read_length, 50);
        assert_eq!(params.stride, 5);
        assert_eq!(params.line_width, 100);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn expected_count_capped_by_target() {
        assert_eq!(small().expected_read_count(), 3);
        let params = SimParams {
            read_count: 2,
            ..small()
        };
        assert_eq!(params.expected_read_count(), 2);
    }

    #[test]
    fn default_runs_out_of_reference() {
        // (100_000_000 - 50) / 5 + 1 falls just short of the 20M target
        assert_eq!(SimParams::default().expected_read_count(), 19_999_991);
    }

    #[test]
    fn expected_count_capped_by_reference() {
        let params = SimParams {
            read_count: 100,
            ..small()
        };
        // starts 0, 2, 4
        assert_eq!(params.expected_read_count(), 3);

        let params = SimParams {
            reference_length: 4,
            ..small()
        };
        assert_eq!(params.max_start(), None);
        assert_eq!(params.expected_read_count(), 0);
    }

    #[test]
    fn read_as_long_as_reference() {
        let params = SimParams {
            reference_length: 5,
            read_count: 10,
            ..small()
        };
        assert_eq!(params.expected_read_count(), 1);
    }

    #[test]
    fn rejects_degenerate_params() {
        let zero_stride = SimParams {
            stride: 0,
            ..small()
        };
        assert!(matches!(zero_stride.validate(), Err(Error::ZeroStride)));
        assert_eq!(zero_stride.expected_read_count(), 0);

        let zero_len = SimParams {
            read_length: 0,
            ..small()
        };
        assert!(matches!(zero_len.validate(), Err(Error::ZeroReadLength)));

        let zero_width = SimParams {
            line_width: 0,
            ..small()
        };
        assert!(matches!(zero_width.validate(), Err(Error::ZeroLineWidth)));

        let rate = SimParams {
            mutation_rate: 1.5,
            ..small()
        };
        assert!(matches!(
            rate.validate(),
            Err(Error::InvalidMutationRate(_))
        ));

        let nan = SimParams {
            mutation_rate: f64::NAN,
            ..small()
        };
        assert!(nan.validate().is_err());

        let range = SimParams {
            min_mutations: 3,
            max_mutations: 2,
            ..small()
        };
        assert!(matches!(
            range.validate(),
            Err(Error::InvalidMutationRange(3, 2))
        ));
    }
}
