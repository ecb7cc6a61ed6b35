//! Tournament CLI
//!
//! Simulate round-robin tournaments with random results and print standings.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use std::str::FromStr;
use tournament::{
    lineup_pairing, IndividualResult, Participant, ParticipantId, Player, RoundResult,
    RoundRobinTeamTournament, RoundRobinTournament, Standings, Team, TeamGameResult,
    TeamTournamentConfig, TiebreakCriterion, Title, TournamentConfig, TournamentError,
};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Round-robin Tournament Runner");
    println!();
    println!("Usage:");
    println!("  tournament run [--players N] [--cycles C] [--seed S] [--config FILE] [--save FILE]");
    println!("  tournament team [--teams N] [--boards B] [--seed S] [--config FILE] [--save FILE]");
    println!("  tournament standings <FILE>");
    println!();
    println!("Config files are TOML; see TournamentConfig / TeamTournamentConfig.");
    println!("Set RUST_LOG=debug for a trace of every state transition.");
    println!();
    println!("Examples:");
    println!("  tournament run --players 5 --seed 1");
    println!("  tournament run --players 6 --cycles 2 --save double.json");
    println!("  tournament team --teams 4 --boards 4");
    println!("  tournament standings double.json");
}

/// Options shared by the simulation commands
struct SimOptions {
    participants: usize,
    cycles: Option<u32>,
    boards: Option<usize>,
    seed: u64,
    config: Option<String>,
    save: Option<String>,
}

fn parse_value<T: FromStr>(flag: &str, value: &str) -> Option<T> {
    let parsed = value.parse().ok();
    if parsed.is_none() {
        eprintln!("Ignoring invalid value for {}: {}", flag, value);
    }
    parsed
}

fn parse_options(args: &[String], participants_flag: &str, default_participants: usize) -> SimOptions {
    let mut options = SimOptions {
        participants: default_participants,
        cycles: None,
        boards: None,
        seed: 42,
        config: None,
        save: None,
    };

    let mut i = 0;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            flag if flag == participants_flag || flag == "-n" => {
                if let Some(value) = value {
                    options.participants = parse_value(participants_flag, value).unwrap_or(options.participants);
                    i += 1;
                }
            }
            "--cycles" | "-c" => {
                if let Some(value) = value {
                    options.cycles = parse_value("--cycles", value);
                    i += 1;
                }
            }
            "--boards" | "-b" => {
                if let Some(value) = value {
                    options.boards = parse_value("--boards", value);
                    i += 1;
                }
            }
            "--seed" | "-s" => {
                if let Some(value) = value {
                    options.seed = parse_value("--seed", value).unwrap_or(options.seed);
                    i += 1;
                }
            }
            "--config" => {
                options.config = value.cloned();
                i += 1;
            }
            "--save" => {
                options.save = value.cloned();
                i += 1;
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    options
}

const TITLES: [Title; 5] = [
    Title::GrandMaster,
    Title::InternationalMaster,
    Title::FideMaster,
    Title::CandidateMaster,
    Title::None,
];

fn create_player(rng: &mut StdRng, name: String) -> Player {
    let rating = rng.gen_range(1800..2700);
    let title = TITLES[((2700 - rating) / 200) as usize % TITLES.len()];
    Player::new(name).with_rating(rating).with_title(title)
}

/// Random outcome of a played game, slightly favouring draws.
fn random_outcome(rng: &mut StdRng) -> (IndividualResult, IndividualResult) {
    match rng.gen_range(0..10) {
        0..=3 => (IndividualResult::Win, IndividualResult::Loss),
        4..=6 => (IndividualResult::Draw, IndividualResult::Draw),
        _ => (IndividualResult::Loss, IndividualResult::Win),
    }
}

fn result_symbol(result: IndividualResult) -> &'static str {
    match result {
        IndividualResult::Win => "1",
        IndividualResult::Draw => "½",
        IndividualResult::Loss => "0",
        IndividualResult::ForfeitWin => "+",
        IndividualResult::ForfeitLoss => "-",
        IndividualResult::VoluntaryBye | IndividualResult::PairingAllocatedBye => "bye",
        IndividualResult::Undefined => "",
    }
}

fn display_name<P: Participant>(roster: &[P], id: Option<ParticipantId>) -> String {
    id.and_then(|id| roster.iter().find(|p| p.id() == id))
        .map(|p| p.name().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_standings<P: Participant>(standings: &Standings<P>, tiebreaks: &[TiebreakCriterion]) {
    print!("{:>3}  {:<24} {:>6}", "#", "Participant", "Pts");
    for criterion in tiebreaks {
        print!(" {:>7}", criterion.label());
    }
    println!();
    println!("{}", "-".repeat(36 + 8 * tiebreaks.len()));

    for (rank, item) in standings.items.iter().enumerate() {
        print!("{:>3}  {:<24}", rank + 1, item.participant.name());
        for score in &item.scores {
            print!(" {:>6.1}", score);
        }
        println!();
    }
}

fn simulate_individual(options: &SimOptions) -> Result<RoundRobinTournament, TournamentError> {
    let mut config = match &options.config {
        Some(path) => TournamentConfig::load(path)?,
        None => TournamentConfig {
            tiebreaks: vec![TiebreakCriterion::SonnebornBerger, TiebreakCriterion::Buchholz],
            ..Default::default()
        },
    };
    if let Some(cycles) = options.cycles {
        config.cycles = cycles;
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let players = (1..=options.participants)
        .map(|i| create_player(&mut rng, format!("Player {}", i)))
        .collect();
    let mut tournament = RoundRobinTournament::new(players, config)?;

    while !tournament.is_finished() {
        tournament.generate_pairings()?;
        let Some(pairings) = tournament.get_pairings() else {
            break;
        };
        let mut round = RoundResult::from_pairings(&pairings.finalize()?);
        for game in &mut round.games {
            if !game.is_finalized() {
                let (result_1, result_2) = random_outcome(&mut rng);
                game.record(result_1, result_2);
            }
        }

        println!("--- Round {} ---", round.index);
        for game in &round.games {
            println!(
                "{:<24} {:>3} - {:<3} {}",
                display_name(&tournament.participants, game.participant_1),
                game.result_1.map_or("", result_symbol),
                game.result_2.map_or("", result_symbol),
                display_name(&tournament.participants, game.participant_2),
            );
        }
        tournament.add_round_result(round)?;
    }

    Ok(tournament)
}

fn run_individual(args: &[String]) {
    let options = parse_options(args, "--players", 6);

    println!("=== Round robin: {} players ===", options.participants);
    println!("Seed: {}", options.seed);
    println!();

    match simulate_individual(&options) {
        Ok(tournament) => {
            println!();
            println!("=== Final Standings ===");
            print_standings(&tournament.get_standings(), &tournament.config.tiebreaks);

            if let Some(path) = &options.save {
                match tournament.save(path) {
                    Ok(()) => println!("\nSaved to {}", path),
                    Err(e) => eprintln!("Warning: Failed to save tournament: {}", e),
                }
            }
        }
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn simulate_team(options: &SimOptions) -> Result<RoundRobinTeamTournament, TournamentError> {
    let mut config = match &options.config {
        Some(path) => TeamTournamentConfig::load(path)?,
        None => TeamTournamentConfig::default(),
    };
    if let Some(cycles) = options.cycles {
        config.cycles = cycles;
    }
    if let Some(boards) = options.boards {
        config.boards = boards;
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let teams = (1..=options.participants)
        .map(|i| {
            let members = (1..=config.boards)
                .map(|board| create_player(&mut rng, format!("Player {}.{}", i, board)))
                .collect();
            Team::new(format!("Team {}", i), members)
        })
        .collect();
    let mut tournament = RoundRobinTeamTournament::new(teams, config)?;

    while !tournament.is_finished() {
        tournament.generate_pairings()?;
        let Some(team_pairings) = tournament.get_team_pairings() else {
            break;
        };
        println!("--- Round {} ---", team_pairings.index);

        for (index, template) in team_pairings.matches.iter().enumerate() {
            let team_1 = template.team_1.and_then(|id| tournament.participant(id)).cloned();
            let team_2 = template.team_2.and_then(|id| tournament.participant(id)).cloned();
            let lineup = lineup_pairing(template, team_1.as_ref(), team_2.as_ref());
            tournament.finalize_team_pairing(index, lineup.clone())?;

            let mut result = TeamGameResult::from_team_pairing(&lineup.finalize()?);
            for board in &mut result.boards {
                if !board.is_finalized() {
                    let (result_1, result_2) = random_outcome(&mut rng);
                    board.record(result_1, result_2);
                }
            }

            let (points_1, points_2) = result
                .finalize()?
                .board_points(&tournament.config.board_scoring_system);
            println!(
                "{:<12} {:>4.1} - {:<4.1} {}",
                display_name(&tournament.participants, result.team_1),
                points_1,
                points_2,
                display_name(&tournament.participants, result.team_2),
            );
            tournament.add_team_game_result(index, result)?;
        }
    }

    Ok(tournament)
}

fn run_team(args: &[String]) {
    let options = parse_options(args, "--teams", 4);

    println!("=== Team round robin: {} teams ===", options.participants);
    println!("Seed: {}", options.seed);
    println!();

    match simulate_team(&options) {
        Ok(tournament) => {
            println!();
            println!("=== Final Standings ===");
            print_standings(&tournament.get_standings(), &tournament.config.tiebreaks);

            if let Some(path) = &options.save {
                match tournament.save(path) {
                    Ok(()) => println!("\nSaved to {}", path),
                    Err(e) => eprintln!("Warning: Failed to save tournament: {}", e),
                }
            }
        }
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn show_standings(args: &[String]) {
    let Some(path) = args.first() else {
        eprintln!("Error: standings requires a saved tournament file");
        print_usage();
        return;
    };

    match RoundRobinTournament::load(path) {
        Ok(tournament) => {
            println!(
                "=== Standings after {} of {} rounds ===",
                tournament.results().len(),
                tournament.total_rounds()
            );
            print_standings(&tournament.get_standings(), &tournament.config.tiebreaks);
        }
        Err(e) => eprintln!("Error: Failed to load {}: {}", path, e),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "run" => run_individual(&args[2..]),
        "team" => run_team(&args[2..]),
        "standings" => show_standings(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
        }
    }
}
