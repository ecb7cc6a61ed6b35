use super::*;

fn id(n: u128) -> ParticipantId {
    ParticipantId::from_u128(n)
}

#[test]
fn test_constructors_are_valid() {
    assert!(PairingSlot::unknown().is_valid());
    assert!(PairingSlot::empty(false).is_valid());
    assert!(PairingSlot::empty(true).is_valid());
    assert!(PairingSlot::fixed(id(1)).is_valid());
    assert!(PairingSlot::candidates([id(1), id(2)]).is_valid());
}

#[test]
fn test_invalid_slots() {
    let empty_candidates = PairingSlot {
        content: SlotContent::Candidates(BTreeSet::new()),
        bye: false,
        nullable: false,
    };
    assert!(!empty_candidates.is_valid());

    let non_nullable_empty = PairingSlot {
        content: SlotContent::Empty,
        bye: false,
        nullable: false,
    };
    assert!(!non_nullable_empty.is_valid());

    let bye_with_content = PairingSlot {
        content: SlotContent::Fixed(id(1)),
        bye: true,
        nullable: false,
    };
    assert!(!bye_with_content.is_valid());

    let nullable_bye = PairingSlot {
        content: SlotContent::Empty,
        bye: true,
        nullable: true,
    };
    assert!(!nullable_bye.is_valid());
}

#[test]
fn test_single_candidate_collapses_to_fixed() {
    let slot = PairingSlot::candidates([id(7)]);
    assert_eq!(slot.content, SlotContent::Fixed(id(7)));
    assert!(slot.is_finalized());
}

#[test]
fn test_finalized() {
    assert!(!PairingSlot::unknown().is_finalized());
    assert!(!PairingSlot::candidates([id(1), id(2)]).is_finalized());
    assert!(PairingSlot::fixed(id(1)).is_finalized());
    assert!(PairingSlot::empty(false).is_finalized());
}

#[test]
fn test_anything_refines_unknown() {
    let unknown = PairingSlot::unknown();
    assert!(PairingSlot::fixed(id(1)).stricter_than(&unknown));
    assert!(PairingSlot::candidates([id(1), id(2)]).stricter_than(&unknown));
    assert!(PairingSlot::empty(false).stricter_than(&unknown));
    assert!(unknown.stricter_than(&unknown));
}

#[test]
fn test_unknown_refines_only_unknown() {
    let unknown = PairingSlot::unknown();
    assert!(!unknown.stricter_than(&PairingSlot::fixed(id(1)).with_nullable(true)));
    assert!(!unknown.stricter_than(&PairingSlot::empty(false)));
}

#[test]
fn test_fixed_and_candidates() {
    let shortlist = PairingSlot::candidates([id(1), id(2), id(3)]);
    assert!(PairingSlot::fixed(id(2)).stricter_than(&shortlist));
    assert!(!PairingSlot::fixed(id(4)).stricter_than(&shortlist));
    assert!(PairingSlot::candidates([id(1), id(3)]).stricter_than(&shortlist));
    assert!(!PairingSlot::candidates([id(1), id(4)]).stricter_than(&shortlist));
    assert!(!shortlist.stricter_than(&PairingSlot::fixed(id(1))));
    assert!(!PairingSlot::fixed(id(1)).stricter_than(&PairingSlot::fixed(id(2))));
}

#[test]
fn test_settled_empty_cannot_gain_content() {
    let empty = PairingSlot::empty(false);
    assert!(!PairingSlot::fixed(id(1)).stricter_than(&empty));
    assert!(!PairingSlot::candidates([id(1), id(2)]).stricter_than(&empty));
    assert!(empty.stricter_than(&empty));
}

#[test]
fn test_shortlist_may_settle_to_empty() {
    // An unused team board resolves from a shortlist to deliberately empty.
    let shortlist = PairingSlot::candidates([id(1), id(2)]).with_nullable(true);
    assert!(PairingSlot::empty(false).stricter_than(&shortlist));

    let fixed = PairingSlot::fixed(id(1)).with_nullable(true);
    assert!(PairingSlot::empty(false).stricter_than(&fixed));
}

#[test]
fn test_nullability_cannot_widen() {
    let strict = PairingSlot::candidates([id(1), id(2)]);
    assert!(!PairingSlot::empty(false).stricter_than(&strict));
    assert!(!PairingSlot::fixed(id(1)).with_nullable(true).stricter_than(&strict));
    assert!(PairingSlot::fixed(id(1)).stricter_than(&strict.clone().with_nullable(true)));
}

#[test]
fn test_byes_match_only_byes() {
    let bye = PairingSlot::empty(true);
    assert!(bye.stricter_than(&bye));
    assert!(!bye.stricter_than(&PairingSlot::empty(false)));
    assert!(!PairingSlot::empty(false).stricter_than(&bye));
    assert!(!bye.stricter_than(&PairingSlot::unknown()));
}

#[test]
fn test_invalid_slot_refines_nothing() {
    let invalid = PairingSlot {
        content: SlotContent::Candidates(BTreeSet::new()),
        bye: false,
        nullable: true,
    };
    assert!(!invalid.stricter_than(&PairingSlot::unknown()));
}

#[test]
fn test_finalized_slot_conversion() {
    let settled = FinalizedSlot::try_from(PairingSlot::fixed(id(3))).unwrap();
    assert_eq!(settled.participant(), Some(id(3)));

    let bye = FinalizedSlot::try_from(PairingSlot::empty(true)).unwrap();
    assert!(bye.is_empty());
    assert!(bye.bye());
    assert!(!bye.nullable());

    assert_eq!(
        FinalizedSlot::try_from(PairingSlot::unknown()),
        Err(PairingError::NotFinal)
    );
    assert_eq!(
        FinalizedSlot::try_from(PairingSlot {
            content: SlotContent::Empty,
            bye: false,
            nullable: false,
        }),
        Err(PairingError::Invalid)
    );

    let back: PairingSlot = FinalizedSlot::from_participant(None, false).into();
    assert_eq!(back, PairingSlot::empty(false));
}
