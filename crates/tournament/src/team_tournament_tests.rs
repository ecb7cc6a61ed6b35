use super::*;
use crate::participant::Player;
use crate::result::IndividualResult;
use crate::tiebreak::TiebreakCriterion;

fn id(n: u128) -> ParticipantId {
    ParticipantId::from_u128(n)
}

/// Team `i` has id `i * 100` and members `i * 100 + 1 ..= i * 100 + size`.
fn teams(count: u128, size: u128) -> Vec<Team> {
    (1..=count)
        .map(|i| {
            let members = (1..=size)
                .map(|j| Player::with_id(id(i * 100 + j), format!("Player {i}.{j}")))
                .collect();
            Team::with_id(id(i * 100), format!("Team {i}"), members)
        })
        .collect()
}

fn tournament(count: u128, boards: usize) -> RoundRobinTeamTournament {
    let config = TeamTournamentConfig {
        boards,
        ..Default::default()
    };
    RoundRobinTeamTournament::new(teams(count, boards as u128), config).unwrap()
}

/// Lines up both teams in roster order and settles the board pairings.
fn line_up(tournament: &mut RoundRobinTeamTournament, index: usize) -> TeamPairing {
    let template = tournament.get_team_pairings().unwrap().matches[index].clone();
    let team_1 = template.team_1.and_then(|team| tournament.participant(team)).cloned();
    let team_2 = template.team_2.and_then(|team| tournament.participant(team)).cloned();
    let pairing = lineup_pairing(&template, team_1.as_ref(), team_2.as_ref());
    tournament.finalize_team_pairing(index, pairing.clone()).unwrap();
    pairing
}

fn play(
    tournament: &mut RoundRobinTeamTournament,
    index: usize,
    result_1: IndividualResult,
    result_2: IndividualResult,
) -> Result<(), TournamentError> {
    let pairing = line_up(tournament, index);
    let mut result = TeamGameResult::from_team_pairing(&pairing.finalize().unwrap());
    for board in &mut result.boards {
        if !board.is_finalized() {
            board.record(result_1, result_2);
        }
    }
    tournament.add_team_game_result(index, result)
}

#[test]
fn test_team_pairings_follow_final_pairings() {
    let mut tournament = tournament(3, 2);
    assert!(tournament.get_team_pairings().is_none());

    tournament.generate_pairings().unwrap();
    let team_pairings = tournament.get_team_pairings().unwrap();
    assert_eq!(team_pairings.matches.len(), 2);
    assert!(team_pairings.matches.iter().all(|m| m.boards.len() == 2));
    assert_eq!(
        team_pairings.matches.iter().filter(|m| m.is_playable()).count(),
        1
    );

    // Re-finalizing the same pairings does not reset the boards.
    let index = team_pairings
        .matches
        .iter()
        .position(TeamPairing::is_playable)
        .unwrap();
    line_up(&mut tournament, index);
    let settled = tournament.get_team_pairings().unwrap();
    tournament
        .finalize_pairings(tournament.get_pairings().unwrap())
        .unwrap();
    assert_eq!(tournament.get_team_pairings(), Some(settled));
}

#[test]
fn test_team_pairing_checks() {
    let mut tournament = tournament(4, 2);
    let template = TeamPairing {
        team_1: None,
        team_2: None,
        boards: Vec::new(),
    };
    assert!(matches!(
        tournament.clarify_team_pairing(0, template),
        Err(TournamentError::Pairing(PairingError::NotGenerated))
    ));

    tournament.generate_pairings().unwrap();
    let current = tournament.get_team_pairings().unwrap().matches[0].clone();
    assert!(matches!(
        tournament.clarify_team_pairing(5, current.clone()),
        Err(TournamentError::Pairing(PairingError::IndexOutOfRange { index: 5, len: 2 }))
    ));

    // A player of a third team may not sit on side 1.
    let team_1 = current.team_1.unwrap();
    let outsider = tournament
        .participants
        .iter()
        .find(|team| Some(team.id) != current.team_1 && Some(team.id) != current.team_2)
        .unwrap()
        .members[0]
        .id;
    let mut wrong = current.clone();
    wrong.boards[0].side_1 = PairingSlot::fixed(outsider);
    assert!(matches!(
        tournament.clarify_team_pairing(0, wrong),
        Err(TournamentError::NotFound(found)) if found == outsider
    ));

    let members = tournament.participant(team_1).unwrap().member_ids();
    let mut shortlist = current.clone();
    shortlist.boards[0].side_1 = PairingSlot::candidates(members);
    tournament.clarify_team_pairing(0, shortlist.clone()).unwrap();
    assert!(matches!(
        tournament.clarify_team_pairing(0, current),
        Err(TournamentError::Pairing(PairingError::Looser))
    ));
    assert!(matches!(
        tournament.finalize_team_pairing(0, shortlist.clone()),
        Err(TournamentError::Pairing(PairingError::NotFinal))
    ));
    assert_eq!(tournament.get_team_pairings().unwrap().matches[0], shortlist);
}

#[test]
fn test_round_waits_for_every_team_match() {
    let mut tournament = tournament(4, 2);
    tournament.generate_pairings().unwrap();

    play(&mut tournament, 1, IndividualResult::Win, IndividualResult::Loss).unwrap();
    assert!(tournament.results().is_empty());
    assert!(tournament.team_results.is_empty());
    assert_eq!(tournament.accumulator.as_ref().unwrap().pending(), 1);
    assert!(tournament.get_pairings().is_some());

    play(&mut tournament, 0, IndividualResult::Draw, IndividualResult::Draw).unwrap();
    assert_eq!(tournament.results().len(), 1);
    assert_eq!(tournament.team_results.len(), 1);
    assert!(tournament.get_pairings().is_none());
    assert!(tournament.get_team_pairings().is_none());
    assert!(tournament.accumulator.is_none());

    let round = &tournament.results().rounds[0];
    assert_eq!(
        (round.games[0].result_1, round.games[0].result_2),
        (IndividualResult::Draw, IndividualResult::Draw)
    );
    assert_eq!(
        (round.games[1].result_1, round.games[1].result_2),
        (IndividualResult::Win, IndividualResult::Loss)
    );
}

#[test]
fn test_team_result_checks() {
    let mut tournament = tournament(4, 2);
    tournament.generate_pairings().unwrap();

    let pairing = line_up(&mut tournament, 0).finalize().unwrap();
    let mut result = TeamGameResult::from_team_pairing(&pairing);
    assert!(matches!(
        tournament.add_team_game_result(0, result.clone()),
        Err(TournamentError::Result(_))
    ));

    for board in &mut result.boards {
        board.record(IndividualResult::Win, IndividualResult::Loss);
    }
    assert!(matches!(
        tournament.add_team_game_result(1, result.clone()),
        Err(TournamentError::Pairing(PairingError::NotFinal))
    ));
    line_up(&mut tournament, 1);
    assert!(matches!(
        tournament.add_team_game_result(1, result.clone()),
        Err(TournamentError::Pairing(PairingError::Mismatch))
    ));
    assert!(matches!(
        tournament.add_team_game_result(2, result.clone()),
        Err(TournamentError::Pairing(PairingError::IndexOutOfRange { .. }))
    ));
    assert_eq!(tournament.accumulator.as_ref().unwrap().pending(), 2);

    tournament.add_team_game_result(0, result).unwrap();
    assert_eq!(tournament.accumulator.as_ref().unwrap().pending(), 1);
}

#[test]
fn test_bye_match_folds_to_voluntary_bye() {
    let mut tournament = tournament(3, 2);
    tournament.generate_pairings().unwrap();
    let team_pairings = tournament.get_team_pairings().unwrap();
    for index in 0..team_pairings.matches.len() {
        play(&mut tournament, index, IndividualResult::Win, IndividualResult::Loss).unwrap();
    }

    let round = &tournament.results().rounds[0];
    let bye = round
        .games
        .iter()
        .find(|game| game.participant_1.is_none() || game.participant_2.is_none())
        .unwrap();
    let present = if bye.participant_1.is_some() {
        bye.result_1
    } else {
        bye.result_2
    };
    assert_eq!(present, IndividualResult::VoluntaryBye);
}

#[test]
fn test_bye_match_with_empty_boards_is_a_bye() {
    let mut tournament = tournament(3, 2);
    tournament.generate_pairings().unwrap();
    let team_pairings = tournament.get_team_pairings().unwrap();
    let bye_index = team_pairings
        .matches
        .iter()
        .position(|m| !m.is_playable())
        .unwrap();

    // The present team fields nobody on either board.
    let mut pairing = team_pairings.matches[bye_index].clone();
    for board in &mut pairing.boards {
        board.side_1 = PairingSlot::empty(false);
        board.side_2 = PairingSlot::empty(false);
    }
    tournament.finalize_team_pairing(bye_index, pairing.clone()).unwrap();
    let result = TeamGameResult::from_team_pairing(&pairing.finalize().unwrap());
    tournament.add_team_game_result(bye_index, result).unwrap();
    play(&mut tournament, 1 - bye_index, IndividualResult::Win, IndividualResult::Loss).unwrap();

    let round = &tournament.results().rounds[0];
    let bye = &round.games[bye_index];
    let present = if bye.participant_1.is_some() {
        (bye.result_1, bye.result_2)
    } else {
        (bye.result_2, bye.result_1)
    };
    assert_eq!(present, (IndividualResult::VoluntaryBye, IndividualResult::Undefined));
    assert!(round.games.iter().all(|game| GameResult::from(game.clone()).is_valid()));
}

#[test]
fn test_results_need_final_boards_and_lock_them() {
    let mut tournament = tournament(4, 1);
    tournament.generate_pairings().unwrap();
    let current = tournament.get_team_pairings().unwrap().matches[0].clone();
    let first_member = |team: Option<ParticipantId>| {
        tournament.participant(team.unwrap()).unwrap().members[0].id
    };
    let (player_1, player_2) = (first_member(current.team_1), first_member(current.team_2));

    let result = TeamGameResult {
        team_1: current.team_1,
        team_2: current.team_2,
        boards: vec![GameResult {
            participant_1: Some(player_1),
            participant_2: Some(player_2),
            result_1: Some(IndividualResult::Win),
            result_2: Some(IndividualResult::Loss),
        }],
    };
    assert!(matches!(
        tournament.add_team_game_result(0, result.clone()),
        Err(TournamentError::Pairing(PairingError::NotFinal))
    ));
    assert_eq!(tournament.accumulator.as_ref().unwrap().pending(), 2);

    let settled = line_up(&mut tournament, 0);
    tournament.add_team_game_result(0, result).unwrap();

    // Once a result is in, the boards of that match cannot move.
    let mut emptied = settled.clone();
    emptied.boards[0].side_1 = PairingSlot::empty(false);
    assert!(matches!(
        tournament.clarify_team_pairing(0, emptied),
        Err(TournamentError::Pairing(PairingError::ResultRecorded { index: 0 }))
    ));
    assert!(matches!(
        tournament.finalize_team_pairing(0, settled.clone()),
        Err(TournamentError::Pairing(PairingError::ResultRecorded { index: 0 }))
    ));
    assert_eq!(tournament.get_team_pairings().unwrap().matches[0], settled);

    // Other matches of the round stay open.
    line_up(&mut tournament, 1);
}

#[test]
fn test_drop_in_only_before_first_round() {
    let mut tournament = tournament(4, 1);
    let late = Team::with_id(id(900), "Late", vec![Player::with_id(id(901), "Late 1")]);
    tournament.drop_in(vec![late.clone()]).unwrap();
    assert_eq!(tournament.participants.len(), 5);

    tournament.generate_pairings().unwrap();
    let matches = tournament.get_team_pairings().unwrap().matches.len();
    for index in 0..matches {
        play(&mut tournament, index, IndividualResult::Win, IndividualResult::Loss).unwrap();
    }
    assert!(matches!(
        tournament.drop_in(vec![Team::new("Later", Vec::new())]),
        Err(TournamentError::Permission(_))
    ));
    assert!(matches!(
        tournament.take_byes(&[late.id]),
        Err(TournamentError::Permission(_))
    ));
}

#[test]
fn test_standings_use_match_points_and_board_points() {
    let mut tournament = tournament(2, 3);
    assert_eq!(tournament.config.tiebreaks, vec![TiebreakCriterion::BoardPoints]);
    tournament.generate_pairings().unwrap();

    let pairing = line_up(&mut tournament, 0).finalize().unwrap();
    let mut result = TeamGameResult::from_team_pairing(&pairing);
    result.boards[0].record(IndividualResult::Win, IndividualResult::Loss);
    result.boards[1].record(IndividualResult::Draw, IndividualResult::Draw);
    result.boards[2].record(IndividualResult::Loss, IndividualResult::Win);
    let team_1 = result.team_1.unwrap();
    tournament.add_team_game_result(0, result).unwrap();
    assert!(tournament.is_finished());

    // 1.5 : 1.5 on the boards is a drawn match.
    let standings = tournament.get_standings();
    assert_eq!(standings.len(), 2);
    assert_eq!(standings.scores_of(team_1), Some(&[1.0, 1.5][..]));
    assert_eq!(standings.items[0].scores, standings.items[1].scores);

    let before = tournament.standings_after(0);
    assert!(before.items.iter().all(|item| item.scores == vec![0.0, 0.0]));
}
