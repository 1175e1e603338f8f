//! Reading and writing solution records, one JSON object per line.

use pretty_assertions::assert_eq;
use twelvecoins::{Failure, Record, Solution, Stage, Weight};

const REFERENCE: &str = concat!(
    r#"{"weighings":[[[1,3,5,7],[2,4,6,8]],[[1,6,8,11],[2,7,9,10]],"#,
    r#"[[2,3,8,12],[5,6,9,11]]]}"#
);

fn read(line: &str) -> Solution {
    Solution::from_record(&line.parse::<Record>().unwrap()).unwrap()
}

#[test]
fn test_one_based_by_default() {
    let solution = read(REFERENCE);
    assert_eq!(solution.zero_coin(), 1);
    assert_eq!(solution.to_record().to_string(), REFERENCE);
}

#[test]
fn test_reversed_record() {
    let record = read(REFERENCE).reverse().unwrap().to_record();
    assert_eq!(record.coins, (1..=12).rev().collect::<Vec<_>>());
    assert_eq!(record.valid, Some(true));
    assert_eq!(record.zero_coin, None);

    let again = Solution::from_record(&record.to_string().parse().unwrap()).unwrap();
    assert!(again.stage().contains(Stage::REVERSED));
    assert_eq!(again.coins(), record.coins.as_slice());
}

#[test]
fn test_numbered_record() {
    let record = read(REFERENCE).numbered().unwrap().to_record();
    assert_eq!(record.n, Some(143_838_760_127));
    assert_eq!(record.p, Some(vec![12, 10, 4, 9, 11, 7, 1, 5, 3, 6, 2, 8]));
    assert_eq!(record.unique, Some(vec![4, 10, 12]));
    assert_eq!(record.triples, Some(vec![2, 6, 8]));
    // derived fields are not read back
    let mut tampered = record.clone();
    tampered.n = Some(0);
    let solution = Solution::from_record(&tampered).unwrap();
    assert_eq!(solution.number(), None);
    // the record holds the canonical weighings, in their own order
    assert_eq!(solution.encode(), Ok(473_153_816 * 304 + 20));
}

#[test]
fn test_invalid_record() {
    let line = concat!(
        r#"{"weighings":[[[1,2,3,4],[5,6,7,8]],[[1,2,5,9],[3,6,10,11]],"#,
        r#"[[1,2,6,10],[4,7,9,12]]]}"#
    );
    let verified = read(line).verify();
    let record = verified.to_record();
    assert_eq!(record.valid, Some(false));
    assert!(record.coins.is_empty());
    for weight in [Weight::Light, Weight::Heavy] {
        assert!(record.failures.contains(&Failure { coin: 1, weight }));
        assert!(record.failures.contains(&Failure { coin: 2, weight }));
    }
    let line = record.to_string();
    assert!(line.contains(r#""valid":false"#));
    assert!(line.contains(r#"{"coin":1,"weight":"light"}"#));

    let again = read(&line);
    assert!(again.stage().contains(Stage::INVALID));
    assert_eq!(again.failures(), verified.failures());
}

#[test]
fn test_zero_based_record() {
    let line = concat!(
        r#"{"weighings":[[[0,2,4,6],[1,3,5,7]],[[0,5,7,10],[1,6,8,9]],"#,
        r#"[[1,2,7,11],[4,5,8,10]]],"zero-coin":0}"#
    );
    let solution = read(line);
    assert_eq!(solution.zero_coin(), 0);
    assert_eq!(solution.encode(), Ok(143_838_760_127));
}

#[test]
fn test_out_of_range_coin() {
    let line = r#"{"weighings":[[[1,2,3,13],[5,6,7,8]],[[1],[2]],[[1],[2]]]}"#;
    let record = line.parse::<Record>().unwrap();
    assert!(Solution::from_record(&record).is_err());
}
