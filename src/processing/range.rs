use thiserror::Error;

/// Failure classes for column-range spec validation. Each message
/// carries a good/bad example pair so users can fix the spec on sight.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("column groups must start and end with digits (good 3,4:8 - bad ,2:8,10:)")]
    BoundaryNotDigit,
    #[error("ranges may only include a single colon (good 3:8 - bad 1:8:3)")]
    MultipleColons,
    #[error("colons must be followed by digits (good 2:4 - bad 1:,10)")]
    ColonNotFollowedByDigit,
    #[error("commas must be followed by digits (good 1,2,9 - bad 2,,3)")]
    CommaNotFollowedByDigit,
    #[error("ranges may only contain digits, commas and colons (found {0:?})")]
    InvalidCharacter(char),
    #[error("column index {index} is out of bounds for a table with {column_count} columns")]
    IndexOutOfBounds { index: usize, column_count: usize },
    #[error("ranges may not include duplicate columns (good 2,4:6 - bad 3,2:7), column {0} repeats")]
    DuplicateIndex(usize),
}

/// Character classes seen by the validation walk.
#[derive(Clone, Copy, PartialEq)]
enum CharClass {
    Start,
    Digit,
    Colon,
    Comma,
}

/// Parse a column-range spec such as `"2,4:6"` into the expanded list of
/// column indices, in order of appearance, duplicate-free, all within
/// `[0, column_count)`. All-or-nothing: any failure returns the first
/// error and commits nothing.
///
/// A colon segment covers the inclusive range between its endpoints
/// regardless of their order, so `"8:3"` equals `"3:8"`.
pub fn parse(spec: &str, column_count: usize) -> Result<Vec<usize>, ParseError> {
    parse_with_taken(spec, column_count, &[])
}

/// Like [`parse`], but additionally rejects indices already claimed by
/// other groups (`taken`) as duplicates.
pub fn parse_with_taken(
    spec: &str,
    column_count: usize,
    taken: &[usize],
) -> Result<Vec<usize>, ParseError> {
    let segments = split_segments(spec)?;
    expand_segments(&segments, column_count, taken)
}

/// Walk the spec character by character, validating structure and
/// splitting it into comma-separated segment strings.
fn split_segments(spec: &str) -> Result<Vec<String>, ParseError> {
    let first_ok = spec.chars().next().is_some_and(|c| c.is_ascii_digit());
    let last_ok = spec.chars().last().is_some_and(|c| c.is_ascii_digit());
    if !first_ok || !last_ok {
        return Err(ParseError::BoundaryNotDigit);
    }

    let mut segments = Vec::new();
    let mut segment = String::new();
    let mut prev = CharClass::Start;
    let mut after_colon = false;

    for ch in spec.chars() {
        let curr = match ch {
            '0'..='9' => CharClass::Digit,
            ':' => CharClass::Colon,
            ',' => CharClass::Comma,
            other => return Err(ParseError::InvalidCharacter(other)),
        };

        // A second colon inside one segment trips before the
        // prev/curr pairing is examined.
        if curr == CharClass::Colon {
            if after_colon {
                return Err(ParseError::MultipleColons);
            }
            after_colon = true;
        }

        match prev {
            CharClass::Start => segment.push(ch),
            CharClass::Digit => {
                if curr == CharClass::Comma {
                    segments.push(std::mem::take(&mut segment));
                    after_colon = false;
                } else {
                    segment.push(ch);
                }
            }
            CharClass::Colon => {
                if curr != CharClass::Digit {
                    return Err(ParseError::ColonNotFollowedByDigit);
                }
                segment.push(ch);
            }
            CharClass::Comma => {
                if curr != CharClass::Digit {
                    return Err(ParseError::CommaNotFollowedByDigit);
                }
                segment.push(ch);
            }
        }

        prev = curr;
    }

    segments.push(segment);
    Ok(segments)
}

fn expand_segments(
    segments: &[String],
    column_count: usize,
    taken: &[usize],
) -> Result<Vec<usize>, ParseError> {
    let mut columns: Vec<usize> = Vec::new();

    let push_checked = |index: usize, columns: &mut Vec<usize>| {
        if index >= column_count {
            return Err(ParseError::IndexOutOfBounds {
                index,
                column_count,
            });
        }
        if columns.contains(&index) || taken.contains(&index) {
            return Err(ParseError::DuplicateIndex(index));
        }
        columns.push(index);
        Ok(())
    };

    for segment in segments {
        match segment.split_once(':') {
            Some((lo, hi)) => {
                let a = parse_index(lo);
                let b = parse_index(hi);
                for index in a.min(b)..=a.max(b) {
                    push_checked(index, &mut columns)?;
                }
            }
            None => push_checked(parse_index(segment), &mut columns)?,
        }
    }

    Ok(columns)
}

/// Segments are all-digits by construction; a failed parse can only be
/// overflow, which the bounds check then rejects.
fn parse_index(digits: &str) -> usize {
    digits.parse::<usize>().unwrap_or(usize::MAX)
}

/// Build the canonical spec text for a list of column indices:
/// consecutive ascending runs collapse to `a:b`, everything else joins
/// with commas. `canonical_spec(parse(s)?)` reparses to the same set.
pub fn canonical_spec(indices: &[usize]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < indices.len() {
        let run_start = indices[i];
        let mut run_end = run_start;
        while i + 1 < indices.len() && indices[i + 1] == run_end + 1 {
            run_end = indices[i + 1];
            i += 1;
        }
        if !out.is_empty() {
            out.push(',');
        }
        if run_start == run_end {
            out.push_str(&run_start.to_string());
        } else {
            out.push_str(&format!("{run_start}:{run_end}"));
        }
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_index() {
        assert_eq!(parse("3", 10).unwrap(), vec![3]);
    }

    #[test]
    fn mixed_segments_expand_in_order() {
        assert_eq!(parse("2,4:6", 10).unwrap(), vec![2, 4, 5, 6]);
    }

    #[test]
    fn reversed_range_equals_forward_range() {
        assert_eq!(parse("8:3", 10).unwrap(), parse("3:8", 10).unwrap());
        assert_eq!(parse("8:3", 10).unwrap(), vec![3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn empty_spec_fails_boundary_check() {
        assert_eq!(parse("", 10), Err(ParseError::BoundaryNotDigit));
    }

    #[test]
    fn leading_comma_fails_boundary_check() {
        assert_eq!(parse(",2:8", 10), Err(ParseError::BoundaryNotDigit));
    }

    #[test]
    fn trailing_colon_fails_boundary_check() {
        assert_eq!(parse("10:", 12), Err(ParseError::BoundaryNotDigit));
    }

    #[test]
    fn two_colons_in_one_segment() {
        assert_eq!(parse("1:8:3", 10), Err(ParseError::MultipleColons));
        assert_eq!(parse("1::2", 10), Err(ParseError::MultipleColons));
    }

    #[test]
    fn colon_reset_across_segments() {
        // One colon per segment is fine.
        assert_eq!(parse("0:1,3:4", 10).unwrap(), vec![0, 1, 3, 4]);
    }

    #[test]
    fn colon_then_comma() {
        assert_eq!(parse("1:,10", 12), Err(ParseError::ColonNotFollowedByDigit));
    }

    #[test]
    fn comma_then_comma() {
        assert_eq!(parse("1,,3", 10), Err(ParseError::CommaNotFollowedByDigit));
    }

    #[test]
    fn comma_then_colon() {
        assert_eq!(parse("1,:5", 10), Err(ParseError::CommaNotFollowedByDigit));
    }

    #[test]
    fn stray_character_is_rejected() {
        assert_eq!(parse("1 ,2", 10), Err(ParseError::InvalidCharacter(' ')));
        assert_eq!(parse("1-3", 10), Err(ParseError::InvalidCharacter('-')));
    }

    #[test]
    fn out_of_bounds_index() {
        assert_eq!(
            parse("5", 5),
            Err(ParseError::IndexOutOfBounds {
                index: 5,
                column_count: 5
            })
        );
        assert_eq!(
            parse("2:7", 5),
            Err(ParseError::IndexOutOfBounds {
                index: 5,
                column_count: 5
            })
        );
    }

    #[test]
    fn duplicate_across_segments() {
        assert_eq!(parse("3,2:7", 10), Err(ParseError::DuplicateIndex(3)));
        assert_eq!(parse("2:4,3", 10), Err(ParseError::DuplicateIndex(3)));
    }

    #[test]
    fn duplicate_against_taken_indices() {
        assert_eq!(
            parse_with_taken("1:3", 10, &[2]),
            Err(ParseError::DuplicateIndex(2))
        );
        assert_eq!(parse_with_taken("1:3", 10, &[7]).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn bounds_invariant_holds_for_all_results() {
        for count in 1..12 {
            if let Ok(indices) = parse("0,2:5,9", count) {
                assert!(indices.iter().all(|&i| i < count));
            }
        }
    }

    #[test]
    fn canonical_spec_round_trip() {
        for spec in ["2,4:6", "0:9", "7", "8:3", "1,3,5"] {
            let indices = parse(spec, 10).unwrap();
            let canonical = canonical_spec(&indices);
            assert_eq!(parse(&canonical, 10).unwrap(), indices);
        }
    }

    #[test]
    fn canonical_spec_collapses_runs() {
        assert_eq!(canonical_spec(&[2, 4, 5, 6]), "2,4:6");
        assert_eq!(canonical_spec(&[3]), "3");
        assert_eq!(canonical_spec(&[0, 1]), "0:1");
    }
}
