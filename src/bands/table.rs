//! Cytogenetic band table
//!
//! Band names follow the ISCN 850-band ideogram as published in the UCSC
//! `cytoBand` track. Each entry lists one chromosome's p-arm bands from the
//! telomere down to the centromere, then its q-arm bands from the centromere
//! out to the telomere. The `p10`/`q10` centromere anchors are inserted by
//! [`super::BandIndex`] and are not listed here.

/// `(chromosome, p-arm bands pter→cen, q-arm bands cen→qter)`
pub(crate) type ChromosomeBands = (&'static str, &'static [&'static str], &'static [&'static str]);

pub(crate) const CHROMOSOME_BANDS: &[ChromosomeBands] = &[
    (
        "1",
        &[
            "36.33", "36.32", "36.31", "36.23", "36.22", "36.21", "36.13", "36.12", "36.11",
            "35.3", "35.2", "35.1", "34.3", "34.2", "34.1", "33", "32.3", "32.2", "32.1", "31.3",
            "31.2", "31.1", "22.3", "22.2", "22.1", "21.3", "21.2", "21.1", "13.3", "13.2",
            "13.1", "12", "11.2", "11.1",
        ],
        &[
            "11", "12", "21.1", "21.2", "21.3", "22", "23.1", "23.2", "23.3", "24.1", "24.2",
            "24.3", "25.1", "25.2", "25.3", "31.1", "31.2", "31.3", "32.1", "32.2", "32.3", "41",
            "42.11", "42.12", "42.13", "42.2", "42.3", "43", "44",
        ],
    ),
    (
        "2",
        &[
            "25.3", "25.2", "25.1", "24.3", "24.2", "24.1", "23.3", "23.2", "23.1", "22.3",
            "22.2", "22.1", "21", "16.3", "16.2", "16.1", "15", "14", "13.3", "13.2", "13.1",
            "12", "11.2", "11.1",
        ],
        &[
            "11.1", "11.2", "12.1", "12.2", "12.3", "13", "14.1", "14.2", "14.3", "21.1", "21.2",
            "21.3", "22.1", "22.2", "22.3", "23.1", "23.2", "23.3", "24.1", "24.2", "24.3",
            "31.1", "31.2", "31.3", "32.1", "32.2", "32.3", "33.1", "33.2", "33.3", "34", "35",
            "36.1", "36.2", "36.3", "37.1", "37.2", "37.3",
        ],
    ),
    (
        "3",
        &[
            "26.3", "26.2", "26.1", "25.3", "25.2", "25.1", "24.3", "24.2", "24.1", "23", "22.3",
            "22.2", "22.1", "21.33", "21.32", "21.31", "21.2", "21.1", "14.3", "14.2", "14.1",
            "13", "12.3", "12.2", "12.1", "11.2", "11.1",
        ],
        &[
            "11.1", "11.2", "12.1", "12.2", "12.3", "13.11", "13.12", "13.13", "13.2", "13.31",
            "13.32", "13.33", "21.1", "21.2", "21.3", "22.1", "22.2", "22.3", "23", "24", "25.1",
            "25.2", "25.31", "25.32", "25.33", "26.1", "26.2", "26.31", "26.32", "26.33", "27.1",
            "27.2", "27.3", "28", "29",
        ],
    ),
    (
        "4",
        &[
            "16.3", "16.2", "16.1", "15.33", "15.32", "15.31", "15.2", "15.1", "14", "13", "12",
            "11",
        ],
        &[
            "11", "12", "13.1", "13.2", "13.3", "21.1", "21.21", "21.22", "21.23", "21.3",
            "22.1", "22.2", "22.3", "23", "24", "25", "26", "27", "28.1", "28.2", "28.3", "31.1",
            "31.21", "31.22", "31.23", "31.3", "32.1", "32.2", "32.3", "33", "34.1", "34.2",
            "34.3", "35.1", "35.2",
        ],
    ),
    (
        "5",
        &[
            "15.33", "15.32", "15.31", "15.2", "15.1", "14.3", "14.2", "14.1", "13.3", "13.2",
            "13.1", "12", "11",
        ],
        &[
            "11.1", "11.2", "12.1", "12.2", "12.3", "13.1", "13.2", "13.3", "14.1", "14.2",
            "14.3", "15", "21.1", "21.2", "21.3", "22.1", "22.2", "22.3", "23.1", "23.2", "23.3",
            "31.1", "31.2", "31.3", "32", "33.1", "33.2", "33.3", "34", "35.1", "35.2", "35.3",
        ],
    ),
    (
        "6",
        &[
            "25.3", "25.2", "25.1", "24.3", "24.2", "24.1", "23", "22.3", "22.2", "22.1",
            "21.33", "21.32", "21.31", "21.2", "21.1", "12.3", "12.2", "12.1", "11.2", "11.1",
        ],
        &[
            "11.1", "11.2", "12", "13", "14.1", "14.2", "14.3", "15", "16.1", "16.2", "16.3", "21",
            "22.1", "22.2", "22.31", "22.32", "22.33", "23.1", "23.2", "23.3", "24.1", "24.2",
            "24.3", "25.1", "25.2", "25.3", "26", "27",
        ],
    ),
    (
        "7",
        &[
            "22.3", "22.2", "22.1", "21.3", "21.2", "21.1", "15.3", "15.2", "15.1", "14.3",
            "14.2", "14.1", "13", "12.3", "12.2", "12.1", "11.2", "11.1",
        ],
        &[
            "11.1", "11.21", "11.22", "11.23", "21.11", "21.12", "21.13", "21.2", "21.3", "22.1",
            "22.2", "22.3", "31.1", "31.2", "31.31", "31.32", "31.33", "32.1", "32.2", "32.3",
            "33", "34", "35", "36.1", "36.2", "36.3",
        ],
    ),
    (
        "8",
        &[
            "23.3", "23.2", "23.1", "22", "21.3", "21.2", "21.1", "12", "11.23", "11.22", "11.21",
            "11.1",
        ],
        &[
            "11.1", "11.21", "11.22", "11.23", "12.1", "12.2", "12.3", "13.1", "13.2", "13.3",
            "21.11", "21.12", "21.13", "21.2", "21.3", "22.1", "22.2", "22.3", "23.1", "23.2",
            "23.3", "24.11", "24.12", "24.13", "24.21", "24.22", "24.23", "24.3",
        ],
    ),
    (
        "9",
        &[
            "24.3", "24.2", "24.1", "23", "22.3", "22.2", "22.1", "21.3", "21.2", "21.1", "13.3",
            "13.2", "13.1", "12", "11.2", "11.1",
        ],
        &[
            "11", "12", "13", "21.11", "21.12", "21.13", "21.2", "21.31", "21.32", "21.33",
            "22.1", "22.2", "22.31", "22.32", "22.33", "31.1", "31.2", "31.3", "32", "33.1",
            "33.2", "33.3", "34.11", "34.12", "34.13", "34.2", "34.3",
        ],
    ),
    (
        "10",
        &[
            "15.3", "15.2", "15.1", "14", "13", "12.33", "12.32", "12.31", "12.2", "12.1",
            "11.23", "11.22", "11.21", "11.1",
        ],
        &[
            "11.1", "11.21", "11.22", "11.23", "21.1", "21.2", "21.3", "22.1", "22.2", "22.3",
            "23.1", "23.2", "23.31", "23.32", "23.33", "24.1", "24.2", "24.31", "24.32", "24.33",
            "25.1", "25.2", "25.3", "26.11", "26.12", "26.13", "26.2", "26.3",
        ],
    ),
    (
        "11",
        &[
            "15.5", "15.4", "15.3", "15.2", "15.1", "14.3", "14.2", "14.1", "13", "12", "11.2",
            "11.12", "11.11",
        ],
        &[
            "11", "12.1", "12.2", "12.3", "13.1", "13.2", "13.3", "13.4", "13.5", "14.1", "14.2",
            "14.3", "21", "22.1", "22.2", "22.3", "23.1", "23.2", "23.3", "24.1", "24.2", "24.3",
            "25",
        ],
    ),
    (
        "12",
        &[
            "13.33", "13.32", "13.31", "13.2", "13.1", "12.3", "12.2", "12.1", "11.23", "11.22",
            "11.21", "11.1",
        ],
        &[
            "11", "12", "13.11", "13.12", "13.13", "13.2", "13.3", "14.1", "14.2", "14.3", "15",
            "21.1", "21.2", "21.31", "21.32", "21.33", "22", "23.1", "23.2", "23.3", "24.11",
            "24.12", "24.13", "24.21", "24.22", "24.23", "24.31", "24.32", "24.33",
        ],
    ),
    (
        "13",
        &["13", "12", "11.2", "11.1"],
        &[
            "11", "12.11", "12.12", "12.13", "12.2", "12.3", "13.1", "13.2", "13.3", "14.11",
            "14.12", "14.13", "14.2", "14.3", "21.1", "21.2", "21.31", "21.32", "21.33", "22.1",
            "22.2", "22.3", "31.1", "31.2", "31.3", "32.1", "32.2", "32.3", "33.1", "33.2",
            "33.3", "34",
        ],
    ),
    (
        "14",
        &["13", "12", "11.2", "11.1"],
        &[
            "11.1", "11.2", "12", "13.1", "13.2", "13.3", "21.1", "21.2", "21.3", "22.1", "22.2",
            "22.3", "23.1", "23.2", "23.3", "24.1", "24.2", "24.3", "31.1", "31.2", "31.3",
            "32.11", "32.12", "32.13", "32.2", "32.31", "32.32", "32.33",
        ],
    ),
    (
        "15",
        &["13", "12", "11.2", "11.1"],
        &[
            "11.1", "11.2", "12", "13.1", "13.2", "13.3", "14", "15.1", "15.2", "15.3", "21.1",
            "21.2", "21.3", "22.1", "22.2", "22.31", "22.32", "22.33", "23", "24.1", "24.2",
            "24.3", "25.1", "25.2", "25.3", "26.1", "26.2", "26.3",
        ],
    ),
    (
        "16",
        &[
            "13.3", "13.2", "13.13", "13.12", "13.11", "12.3", "12.2", "12.1", "11.2", "11.1",
        ],
        &[
            "11.1", "11.2", "12.1", "12.2", "13", "21", "22.1", "22.2", "22.3", "23.1", "23.2",
            "23.3", "24.1", "24.2", "24.3",
        ],
    ),
    (
        "17",
        &["13.3", "13.2", "13.1", "12", "11.2", "11.1"],
        &[
            "11.1", "11.2", "12", "21.1", "21.2", "21.31", "21.32", "21.33", "22", "23.1", "23.2",
            "23.3", "24.1", "24.2", "24.3", "25.1", "25.2", "25.3",
        ],
    ),
    (
        "18",
        &["11.32", "11.31", "11.23", "11.22", "11.21", "11.1"],
        &[
            "11.1", "11.2", "12.1", "12.2", "12.3", "21.1", "21.2", "21.31", "21.32", "21.33",
            "22.1", "22.2", "22.3", "23",
        ],
    ),
    (
        "19",
        &["13.3", "13.2", "13.13", "13.12", "13.11", "12", "11"],
        &[
            "11", "12", "13.11", "13.12", "13.13", "13.2", "13.31", "13.32", "13.33", "13.41",
            "13.42", "13.43",
        ],
    ),
    (
        "20",
        &["13", "12.3", "12.2", "12.1", "11.23", "11.22", "11.21", "11.1"],
        &[
            "11.1", "11.21", "11.22", "11.23", "12", "13.11", "13.12", "13.13", "13.2", "13.31",
            "13.32", "13.33",
        ],
    ),
    (
        "21",
        &["13", "12", "11.2", "11.1"],
        &[
            "11.1", "11.2", "21.1", "21.2", "21.3", "22.11", "22.12", "22.13", "22.2", "22.3",
        ],
    ),
    (
        "22",
        &["13", "12", "11.2", "11.1"],
        &[
            "11.1", "11.21", "11.22", "11.23", "12.1", "12.2", "12.3", "13.1", "13.2", "13.31",
            "13.32", "13.33",
        ],
    ),
    (
        "x",
        &[
            "22.33", "22.32", "22.31", "22.2", "22.13", "22.12", "22.11", "21.3", "21.2", "21.1",
            "11.4", "11.3", "11.23", "11.22", "11.21", "11.1",
        ],
        &[
            "11.1", "11.2", "12", "13.1", "13.2", "13.3", "21.1", "21.2", "21.31", "21.32",
            "21.33", "22.1", "22.2", "22.3", "23", "24", "25", "26.1", "26.2", "26.3", "27.1",
            "27.2", "27.3", "28",
        ],
    ),
    (
        "y",
        &["11.32", "11.31", "11.2", "11.1"],
        &["11.1", "11.21", "11.221", "11.222", "11.223", "11.23", "12"],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_chromosomes_present() {
        let names: Vec<&str> = CHROMOSOME_BANDS.iter().map(|(c, _, _)| *c).collect();
        assert_eq!(names.len(), 24);
        assert_eq!(names[0], "1");
        assert_eq!(names[21], "22");
        assert_eq!(names[22], "x");
        assert_eq!(names[23], "y");
    }

    #[test]
    fn test_no_duplicate_sub_bands() {
        for (chrom, p, q) in CHROMOSOME_BANDS {
            for arm in [p, q] {
                let mut seen = std::collections::HashSet::new();
                for band in arm.iter() {
                    assert!(seen.insert(band), "duplicate band {chrom} {band}");
                }
            }
        }
    }
}
