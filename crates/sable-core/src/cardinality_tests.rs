use crate::{Bound, CardinalityInterval};

#[test]
fn display_uses_operator_syntax() {
    let rendered = [
        CardinalityInterval::ONE_ONE,
        CardinalityInterval::ZERO_ONE,
        CardinalityInterval::ZERO_OR_MORE,
        CardinalityInterval::ONE_OR_MORE,
        CardinalityInterval::exactly(3),
        CardinalityInterval::at_least(2),
        CardinalityInterval::between(2, 5).unwrap(),
        CardinalityInterval::between(0, 4).unwrap(),
    ]
    .iter()
    .map(|c| format!("[{c}]"))
    .collect::<Vec<_>>()
    .join(" ");

    insta::assert_snapshot!(rendered, @"[] [?] [*] [+] [^3] [^2..] [^(2..5)] [^(0..4)]");
}

#[test]
fn new_rejects_inverted_bounds() {
    assert!(CardinalityInterval::new(3, Bound::Finite(2)).is_none());
    assert!(CardinalityInterval::new(3, Bound::Infinite).is_some());
}

#[test]
fn inclusion() {
    let one = CardinalityInterval::ONE_ONE;
    let opt = CardinalityInterval::ZERO_ONE;
    let star = CardinalityInterval::ZERO_OR_MORE;
    let plus = CardinalityInterval::ONE_OR_MORE;

    assert!(one.is_included_in(&opt));
    assert!(one.is_included_in(&plus));
    assert!(opt.is_included_in(&star));
    assert!(!opt.is_included_in(&one));
    assert!(!star.is_included_in(&plus));
    assert!(plus.is_included_in(&star));
}

#[test]
fn at_most_one() {
    assert!(CardinalityInterval::ZERO_ZERO.is_at_most_one());
    assert!(CardinalityInterval::ZERO_ONE.is_at_most_one());
    assert!(CardinalityInterval::ONE_ONE.is_at_most_one());
    assert!(!CardinalityInterval::ONE_OR_MORE.is_at_most_one());
    assert!(!CardinalityInterval::exactly(2).is_at_most_one());
}

#[test]
fn add_and_union() {
    let opt = CardinalityInterval::ZERO_ONE;
    let plus = CardinalityInterval::ONE_OR_MORE;

    assert_eq!(opt.add(&opt), CardinalityInterval::between(0, 2).unwrap());
    assert_eq!(opt.add(&plus), CardinalityInterval::ONE_OR_MORE);
    assert_eq!(
        CardinalityInterval::exactly(2).union(&CardinalityInterval::exactly(4)),
        CardinalityInterval::between(2, 4).unwrap()
    );
}

#[test]
fn compose_multiplies_bounds() {
    let opt = CardinalityInterval::ZERO_ONE;
    let one = CardinalityInterval::ONE_ONE;
    let star = CardinalityInterval::ZERO_OR_MORE;

    assert_eq!(opt.compose(&one), opt);
    assert_eq!(one.compose(&star), star);
    assert_eq!(CardinalityInterval::ZERO_ZERO.compose(&star), CardinalityInterval::ZERO_ZERO);
    assert_eq!(
        CardinalityInterval::exactly(2).compose(&CardinalityInterval::between(1, 3).unwrap()),
        CardinalityInterval::between(2, 6).unwrap()
    );
}

#[test]
fn separated_count() {
    assert_eq!(
        CardinalityInterval::exactly(2).separated_count(),
        CardinalityInterval::exactly(3)
    );
    assert_eq!(
        CardinalityInterval::ZERO_OR_MORE.separated_count(),
        CardinalityInterval::ZERO_OR_MORE
    );
    assert_eq!(
        CardinalityInterval::between(0, 2).unwrap().separated_count(),
        CardinalityInterval::between(0, 3).unwrap()
    );
}

#[test]
fn predecessor_saturates() {
    assert_eq!(
        CardinalityInterval::ONE_OR_MORE.predecessor(),
        CardinalityInterval::ZERO_OR_MORE
    );
    assert_eq!(
        CardinalityInterval::ZERO_ONE.predecessor(),
        CardinalityInterval::ZERO_ZERO
    );
}
