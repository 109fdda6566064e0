#[cfg(test)]
mod batch_tests {
    use tetramer::cli::synth::random_sequences;
    use tetramer::cli::BigCount;
    use tetramer::kmers::batch::*;
    use tetramer::kmers::codec::SymbolCodec;
    use tetramer::kmers::counting::*;
    use tetramer::kmers::error::KmerError;

    fn row_sum(row: &CountVector) -> BigCount {
        row.iter().sum()
    }

    #[test]
    fn each_row_matches_its_sequence() {
        let codec = SymbolCodec::new();
        let seqs = vec![b"ACGT".to_vec(), b"AAAAA".to_vec(), b"TTTTTTT".to_vec()];
        let (matrix, report) = count_batch(&seqs, &codec, FailurePolicy::Collect).unwrap();

        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix[0][27], 1);
        assert_eq!(matrix[1][0], 2);
        assert_eq!(matrix[2][255], 4);

        assert!(report.is_complete());
        assert_eq!(report.counters.total, 3);
        assert_eq!(report.counters.counted, 3);
        assert_eq!(report.counters.windows, 1 + 2 + 4);
    }

    #[test]
    fn reused_matrix_is_reset_between_runs() {
        let codec = SymbolCodec::new();
        let mut matrix: Vec<CountVector> = vec![[0; N_KMERS]; 2];

        count_matrix(
            &[b"AAAAAAAA", b"CCCCCCCC"],
            &mut matrix,
            &codec,
            FailurePolicy::Collect,
        )
        .unwrap();
        assert_eq!(matrix[0][0], 5);

        count_matrix(
            &[b"GGGG", b"TTTT"],
            &mut matrix,
            &codec,
            FailurePolicy::Collect,
        )
        .unwrap();
        assert_eq!(matrix[0][0], 0);
        assert_eq!(matrix[0][0b10_10_10_10], 1);
        assert_eq!(row_sum(&matrix[0]), 1);
        assert_eq!(matrix[1][255], 1);
        assert_eq!(row_sum(&matrix[1]), 1);
    }

    #[test]
    fn stale_rows_are_cleared_even_when_prefilled() {
        let codec = SymbolCodec::new();
        let mut matrix: Vec<CountVector> = vec![[9; N_KMERS]; 1];
        count_matrix(&[b"ACGT"], &mut matrix, &codec, FailurePolicy::Collect).unwrap();
        assert_eq!(row_sum(&matrix[0]), 1);
    }

    #[test]
    fn length_mismatch_leaves_matrix_untouched() {
        let codec = SymbolCodec::new();
        let mut matrix: Vec<CountVector> = vec![[7; N_KMERS]; 1];
        let seqs = [b"ACGT", b"ACGT"];

        for result in [
            count_matrix(&seqs, &mut matrix, &codec, FailurePolicy::Collect),
            par_count_matrix(&seqs, &mut matrix, &codec, FailurePolicy::Collect),
        ] {
            assert_eq!(
                result,
                Err(KmerError::LengthMismatch {
                    sequences: 2,
                    vectors: 1
                })
            );
        }
        assert!(matrix[0].iter().all(|&c| c == 7));
    }

    #[test]
    fn failing_sequence_does_not_affect_others() {
        let codec = SymbolCodec::new();
        let seqs = vec![
            b"ACGTACGT".to_vec(),
            b"ACGNACGT".to_vec(),
            b"ACG".to_vec(),
            b"TTTT".to_vec(),
        ];
        let mut matrix: Vec<CountVector> = vec![[3; N_KMERS]; 4];
        let report = count_matrix(&seqs, &mut matrix, &codec, FailurePolicy::Collect).unwrap();

        assert_eq!(row_sum(&matrix[0]), 5);
        assert_eq!(row_sum(&matrix[1]), 0);
        assert_eq!(row_sum(&matrix[2]), 0);
        assert_eq!(matrix[3][255], 1);

        assert!(!report.is_complete());
        assert_eq!(report.counters.total, 4);
        assert_eq!(report.counters.counted, 2);
        assert_eq!(report.counters.invalid_symbol, 1);
        assert_eq!(report.counters.too_short, 1);
        assert_eq!(report.counters.failed(), 2);
        assert_eq!(
            report.failures,
            vec![
                (
                    1,
                    KmerError::InvalidSymbol {
                        position: 3,
                        byte: b'N'
                    }
                ),
                (2, KmerError::SequenceTooShort { len: 3 }),
            ]
        );
    }

    #[test]
    fn fail_fast_keeps_completed_rows() {
        let codec = SymbolCodec::new();
        let seqs = vec![b"AAAA".to_vec(), b"AANA".to_vec(), b"CCCC".to_vec()];
        let mut matrix: Vec<CountVector> = vec![[5; N_KMERS]; 3];

        let err = count_matrix(&seqs, &mut matrix, &codec, FailurePolicy::FailFast).unwrap_err();
        assert_eq!(
            err,
            KmerError::Sequence {
                index: 1,
                source: Box::new(KmerError::InvalidSymbol {
                    position: 2,
                    byte: b'N'
                }),
            }
        );
        assert_eq!(matrix[0][0], 1);
        assert_eq!(row_sum(&matrix[0]), 1);
        assert_eq!(row_sum(&matrix[1]), 0);
        // Never reached
        assert!(matrix[2].iter().all(|&c| c == 5));
    }

    #[test]
    fn parallel_matches_serial() {
        let codec = SymbolCodec::new();
        let mut seqs = random_sequences(64, 2_000, Some(11));
        seqs[5][100] = b'N';
        seqs[40].truncate(2);

        let (serial, serial_report) = count_batch(&seqs, &codec, FailurePolicy::Collect).unwrap();
        let (parallel, parallel_report) =
            par_count_batch(&seqs, &codec, FailurePolicy::Collect).unwrap();

        assert_eq!(serial, parallel);
        assert_eq!(serial_report, parallel_report);
        assert_eq!(
            parallel_report
                .failures
                .iter()
                .map(|(i, _)| *i)
                .collect::<Vec<_>>(),
            vec![5, 40]
        );
    }

    #[test]
    fn parallel_fail_fast_reports_a_failing_index() {
        let codec = SymbolCodec::new();
        let mut seqs = random_sequences(32, 100, Some(3));
        seqs[20][0] = b'X';

        let err = par_count_batch(&seqs, &codec, FailurePolicy::FailFast).unwrap_err();
        match err {
            KmerError::Sequence { index, source } => {
                assert_eq!(index, 20);
                assert_eq!(
                    *source,
                    KmerError::InvalidSymbol {
                        position: 0,
                        byte: b'X'
                    }
                );
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn parallel_fail_fast_matches_serial_with_two_failures() {
        let codec = SymbolCodec::new();
        let mut seqs = random_sequences(64, 2_000, Some(17));
        // Row 0 keeps one worker busy; row 2 fails on its last byte,
        // row 32 fails on its first.
        seqs[0] = random_sequences(1, 20_000_000, Some(18)).remove(0);
        let last = seqs[2].len() - 1;
        seqs[2][last] = b'N';
        seqs[32][0] = b'N';

        let mut serial: Vec<CountVector> = vec![[5; N_KMERS]; seqs.len()];
        let serial_err =
            count_matrix(&seqs, &mut serial, &codec, FailurePolicy::FailFast).unwrap_err();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .build()
            .unwrap();
        let mut parallel: Vec<CountVector> = vec![[5; N_KMERS]; seqs.len()];
        let parallel_err = pool
            .install(|| par_count_matrix(&seqs, &mut parallel, &codec, FailurePolicy::FailFast))
            .unwrap_err();

        assert_eq!(
            serial_err,
            KmerError::Sequence {
                index: 2,
                source: Box::new(KmerError::InvalidSymbol {
                    position: last,
                    byte: b'N'
                }),
            }
        );
        assert_eq!(parallel_err, serial_err);
        assert_eq!(parallel[..=2], serial[..=2]);
        assert_eq!(row_sum(&parallel[0]), 20_000_000 - 3);
        assert_eq!(row_sum(&parallel[2]), 0);
    }

    #[test]
    fn sequence_error_names_index_and_keeps_cause_as_source() {
        let err = KmerError::Sequence {
            index: 1,
            source: Box::new(KmerError::SequenceTooShort { len: 2 }),
        };
        assert_eq!(err.to_string(), "counting sequence 1 failed");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(
            source.to_string(),
            "sequence of length 2 is shorter than k = 4"
        );
    }

    #[test]
    fn batch_row_sums_follow_lengths() {
        let codec = SymbolCodec::new();
        let seqs = random_sequences(20, 25_000, Some(1));
        let (matrix, report) = par_count_batch(&seqs, &codec, FailurePolicy::Collect).unwrap();

        for row in &matrix {
            assert_eq!(row_sum(row), 25_000 - 3);
        }
        assert_eq!(report.counters.windows, 20 * (25_000 - 3));
    }

    #[test]
    fn empty_batch_is_fine() {
        let codec = SymbolCodec::new();
        let seqs: Vec<Vec<u8>> = Vec::new();
        let (matrix, report) = count_batch(&seqs, &codec, FailurePolicy::default()).unwrap();
        assert!(matrix.is_empty());
        assert_eq!(report, BatchReport::default());
    }
}
