use super::*;
use crate::pairing::Pairings;
use IndividualResult::*;

fn id(n: u128) -> ParticipantId {
    ParticipantId::from_u128(n)
}

fn game(a: Option<u128>, b: Option<u128>) -> GameResult {
    GameResult {
        participant_1: a.map(id),
        participant_2: b.map(id),
        result_1: None,
        result_2: None,
    }
}

#[test]
fn test_unplayed_flags() {
    assert!(!Win.unplayed());
    assert!(!Draw.unplayed());
    assert!(!Loss.unplayed());
    for result in [ForfeitWin, ForfeitLoss, VoluntaryBye, PairingAllocatedBye, Undefined] {
        assert!(result.unplayed());
    }
    assert!(ForfeitLoss.voluntarily_unplayed());
    assert!(VoluntaryBye.voluntarily_unplayed());
    assert!(!ForfeitWin.voluntarily_unplayed());
    assert!(!PairingAllocatedBye.voluntarily_unplayed());
}

#[test]
fn test_symmetric_outcomes() {
    let accepted = [
        (Win, Loss),
        (Loss, Win),
        (Draw, Draw),
        (ForfeitWin, ForfeitLoss),
        (ForfeitLoss, ForfeitWin),
        (ForfeitLoss, ForfeitLoss),
    ];
    for (a, b) in accepted {
        assert!(game(Some(1), Some(2)).with_results(a, b).is_valid(), "{a:?}/{b:?}");
    }

    let rejected = [
        (Win, Win),
        (Loss, Loss),
        (Win, Draw),
        (ForfeitWin, ForfeitWin),
        (Win, ForfeitLoss),
        (VoluntaryBye, Undefined),
    ];
    for (a, b) in rejected {
        assert!(!game(Some(1), Some(2)).with_results(a, b).is_valid(), "{a:?}/{b:?}");
    }
}

#[test]
fn test_unfinished_game_between_two_players_is_valid() {
    assert!(game(Some(1), Some(2)).is_valid());
    assert!(!game(Some(1), Some(2)).is_finalized());
}

#[test]
fn test_side_facing_nobody_needs_bye_like_result() {
    assert!(game(Some(1), None).with_results(VoluntaryBye, Undefined).is_valid());
    assert!(game(Some(1), None).with_results(PairingAllocatedBye, Undefined).is_valid());
    assert!(!game(Some(1), None).with_results(Win, Undefined).is_valid());
    assert!(!game(None, Some(2)).with_results(Undefined, ForfeitWin).is_valid());
    assert!(!game(Some(1), None).is_valid());
}

#[test]
fn test_from_pairing_voluntary_absence() {
    let pairing = FinalizedGamePairing::from_participants(Some(id(1)), None);
    let result = GameResult::from_pairing(&pairing);
    assert_eq!(result.result_1, Some(VoluntaryBye));
    assert_eq!(result.result_2, Some(Undefined));
    assert!(result.is_finalized());
    assert!(result.is_valid());
}

#[test]
fn test_from_pairing_allocated_bye() {
    let pairing = FinalizedGamePairing::with_byes(None, Some(id(2)), true, false);
    let result = GameResult::from_pairing(&pairing);
    assert_eq!(result.result_1, Some(Undefined));
    assert_eq!(result.result_2, Some(PairingAllocatedBye));
}

#[test]
fn test_from_pairing_decisive_game_is_open() {
    let pairing = FinalizedGamePairing::from_participants(Some(id(1)), Some(id(2)));
    let result = GameResult::from_pairing(&pairing);
    assert_eq!(result.result_1, None);
    assert_eq!(result.result_2, None);
    assert_eq!(result.finalize(), Err(ResultError::NotFinalized));
}

#[test]
fn test_round_trip_preserves_bye_structure() {
    let pairings = FinalizedPairings {
        index: RoundIndex::Single(1),
        games: vec![
            FinalizedGamePairing::from_participants(Some(id(1)), Some(id(2))),
            FinalizedGamePairing::from_participants(Some(id(3)), None),
            FinalizedGamePairing::with_byes(None, Some(id(4)), true, false),
        ],
    };
    let mut round = RoundResult::from_pairings(&pairings);
    round.games[0].record(Win, Loss);

    assert_eq!(round.pairings(), pairings);
    assert_eq!(round.finalize().unwrap().pairings(), pairings);
    assert!(Pairings::from(round.pairings()).stricter_than(&Pairings::from(pairings)));
}

#[test]
fn test_round_finalize_reports_invalid_first() {
    let round = RoundResult {
        index: RoundIndex::Single(1),
        games: vec![game(Some(1), Some(2)).with_results(Win, Win), game(Some(3), Some(4))],
    };
    assert_eq!(round.finalize(), Err(ResultError::Invalid));
}

#[test]
fn test_sides_skip_absent_participants() {
    let result = game(Some(1), None)
        .with_results(VoluntaryBye, Undefined)
        .finalize()
        .unwrap();
    let sides: Vec<_> = result.sides().collect();
    assert_eq!(sides.len(), 1);
    assert_eq!(sides[0].participant, id(1));
    assert_eq!(sides[0].opponent, None);
    assert_eq!(sides[0].result, VoluntaryBye);
}

#[test]
fn test_history_participant_ids() {
    let mut history = Results::default();
    assert!(history.is_empty());
    history.push(FinalizedRoundResult {
        index: RoundIndex::Single(1),
        games: vec![game(Some(1), Some(2)).with_results(Draw, Draw).finalize().unwrap()],
    });
    assert_eq!(history.len(), 1);
    assert_eq!(history.participant_ids(), [id(1), id(2)].into_iter().collect());
}
