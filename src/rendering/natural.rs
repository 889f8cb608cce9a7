//! Natural ordering of strings, so that "page2" sorts before "page10"

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compare two strings treating runs of digits as numbers and letters
/// without regard to case.
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    let mut left = a
        .chars()
        .peekable();
    let mut right = b
        .chars()
        .peekable();

    loop {
        match (
            left.peek()
                .copied(),
            right.peek()
                .copied(),
        ) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let first = take_digits(&mut left);
                let second = take_digits(&mut right);

                let ordering = compare_numeric(&first, &second);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                let ordering = x
                    .to_lowercase()
                    .cmp(y.to_lowercase());
                if ordering != Ordering::Equal {
                    return ordering;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        digits.push(c);
    }
    digits
}

// Leading zeros don't change the value; a longer run of significant digits
// is the larger number.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');

    a.len()
        .cmp(&b.len())
        .then_with(|| a.cmp(b))
}
