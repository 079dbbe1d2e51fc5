use optional::{Optional, NO_VALUE};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Operation {
    Set(u32),
    Replace(u32),
    Take,
    Reset,
    Swap(Option<u32>),
    Assign(Option<u32>),
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    proptest::collection::vec(
        prop_oneof![
            any::<u32>().prop_map(Operation::Set),
            any::<u32>().prop_map(Operation::Replace),
            Just(Operation::Take),
            Just(Operation::Reset),
            proptest::option::of(any::<u32>()).prop_map(Operation::Swap),
            proptest::option::of(any::<u32>()).prop_map(Operation::Assign),
        ],
        1..100,
    )
}

proptest! {
    #[test]
    fn optional_matches_std_option(ops in operations()) {
        let mut model: Option<u32> = None;
        let mut subject: Optional<u32> = Optional::none();

        for op in ops {
            match op {
                Operation::Set(value) => {
                    model = Some(value);
                    subject.set(value);
                }
                Operation::Replace(value) => {
                    let model_res = model.replace(value);
                    let subject_res = subject.replace(value);
                    prop_assert_eq!(model_res, subject_res, "replace result mismatch");
                }
                Operation::Take => {
                    prop_assert_eq!(model.take(), subject.take(), "take result mismatch");
                }
                Operation::Reset => {
                    model = None;
                    subject.reset();
                }
                Operation::Swap(other) => {
                    let mut model_other = other;
                    let mut subject_other = Optional::from_option(other);
                    std::mem::swap(&mut model, &mut model_other);
                    subject.swap(&mut subject_other);
                    prop_assert_eq!(model_other, subject_other.into_option(), "swapped-out side mismatch");
                }
                Operation::Assign(source) => {
                    model = source;
                    subject.clone_from(&Optional::from_option(source));
                }
            }
            prop_assert_eq!(model, subject.as_option().copied());
            prop_assert_eq!(model.is_some(), subject.has_value());
        }
    }

    #[test]
    fn comparisons_agree_with_std_option(
        a in proptest::option::of(any::<u32>()),
        b in proptest::option::of(any::<u32>()),
    ) {
        let opt_a = Optional::from_option(a);
        let opt_b = Optional::from_option(b);

        prop_assert_eq!(a == b, opt_a == opt_b);
        prop_assert_eq!(a.partial_cmp(&b), opt_a.partial_cmp(&opt_b));
        prop_assert_eq!(a.cmp(&b), opt_a.cmp(&opt_b));
        prop_assert_eq!(a.is_none(), NO_VALUE == opt_a);
        prop_assert_eq!(a.is_some(), NO_VALUE < opt_a);

        if let Some(value) = b {
            prop_assert_eq!(a == Some(value), opt_a == value);
            prop_assert_eq!(a.partial_cmp(&Some(value)), opt_a.partial_cmp(&value));
        }
    }

    #[test]
    fn swap_is_self_inverse(
        a in proptest::option::of(any::<u32>()),
        b in proptest::option::of(any::<u32>()),
    ) {
        let mut opt_a = Optional::from_option(a);
        let mut opt_b = Optional::from_option(b);

        opt_a.swap(&mut opt_b);
        opt_a.swap(&mut opt_b);

        prop_assert_eq!(a, opt_a.into_option());
        prop_assert_eq!(b, opt_b.into_option());
    }

    #[test]
    fn clone_round_trips(a in proptest::option::of(any::<u32>())) {
        let opt = Optional::from_option(a);
        prop_assert_eq!(opt.clone(), opt);
    }
}

#[test]
fn bad_access_displays_its_name() {
    let error = Optional::<u32>::none()
        .try_value()
        .expect_err("an empty optional reports BadAccess");
    assert_eq!("BadAccess", error.to_string());
}
