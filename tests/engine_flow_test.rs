//! End-to-end flows: parse a bet, resolve a game, apply the settlement,
//! and verify what survives a restart.

use betline::games::types::CoinSide;
use betline::{
    parse_bet, validate_bet, Action, EngineConfig, GameParams, JsonFileStore, Ledger, Metric,
    Mode, Outcome, Resolver, ScriptedRandom, SeededRandom, SessionTable, TableOpening, Turn,
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

#[tokio::test]
async fn fresh_user_goes_all_in_and_loses_everything() {
    init_logging();
    let config = EngineConfig::default();
    let ledger = Ledger::open(&config, Box::new(betline::MemoryStore::new())).await;
    let resolver = Resolver::new(config.economy.clone());

    let profile = ledger.get_or_create("8675309").await;
    assert_eq!(profile.cash, 1000);

    let amount = parse_bet("max", profile.cash);
    let bet = validate_bet(amount, profile.cash).unwrap();
    assert_eq!(bet, 1000);

    // Coin forced to tails against a heads call.
    let mut rng = ScriptedRandom::new([1]);
    let settlement = resolver
        .resolve(
            &GameParams::CoinFlip {
                call: CoinSide::Heads,
            },
            bet,
            &mut rng,
        )
        .unwrap();
    assert_eq!(settlement.outcome, Outcome::Loss);

    let applied = ledger.apply("8675309", &settlement).await;
    assert_eq!(applied.record.cash, 0);
    assert_eq!(applied.record.losses, 1);
    assert_eq!(applied.record.wins, 0);
    assert_eq!(applied.record.total_bet, 1000);

    // Broke players can't re-bet.
    assert!(validate_bet(parse_bet("allin", 0), 0).is_err());
}

#[tokio::test]
async fn records_survive_a_restart_through_the_json_store() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("players.json");
    let config = EngineConfig::default();
    let resolver = Resolver::new(config.economy.clone());

    {
        let ledger = Ledger::open(&config, Box::new(JsonFileStore::new(&path))).await;
        // A forced dice win: d6 called 4, rolled 4, pays 6:1.
        let mut rng = ScriptedRandom::new([3]);
        let settlement = resolver
            .resolve(&GameParams::Dice { sides: 6, called: 4 }, 100, &mut rng)
            .unwrap();
        assert_eq!(settlement.cash_delta, 600);
        ledger.apply("12345", &settlement).await;
    }

    // Fresh ledger instance over the same document.
    let ledger = Ledger::open(&config, Box::new(JsonFileStore::new(&path))).await;
    let record = ledger.get_or_create("12345").await;
    assert_eq!(record.cash, 1600);
    assert_eq!(record.wins, 1);
    assert_eq!(record.total_bet, 100);
    assert_eq!(record.total_won, 700);
    assert_eq!(record.xp, 100);
}

#[tokio::test]
async fn blackjack_sessions_settle_into_the_ledger() {
    init_logging();
    let config = EngineConfig::default();
    let ledger = Ledger::open(&config, Box::new(betline::MemoryStore::new())).await;
    let table = SessionTable::new(&config);

    let profile = ledger.get_or_create("777").await;
    let bet = validate_bet(parse_bet("250", profile.cash), profile.cash).unwrap();

    // Play seeds until a hand resolves through player actions, then
    // apply its settlement.
    let mut settled = None;
    for seed in 0..64 {
        let mut rng = SeededRandom::new(seed);
        match table.open("777", bet, Mode::Easy, &mut rng) {
            TableOpening::Settled(settlement) => {
                settled = Some(settlement);
                break;
            }
            TableOpening::InPlay { id, .. } => match table.act(id, "777", Action::Stand).unwrap()
            {
                Turn::Settled(settlement) => {
                    settled = Some(settlement);
                    break;
                }
                Turn::Continue(_) => panic!("stand always settles"),
            },
        }
    }
    let settlement = settled.expect("some seed resolves a hand");

    let applied = ledger.apply("777", &settlement).await;
    let record = applied.record;
    assert_eq!(record.wins + record.losses, if settlement.outcome == Outcome::Push { 0 } else { 1 });
    assert_eq!(record.total_bet, 250);
    // The stake bounds the loss in every case.
    assert!(record.cash >= profile.cash - 250);
}

#[tokio::test]
async fn leaderboard_reorders_after_settlements() {
    init_logging();
    let config = EngineConfig::default();
    let ledger = Ledger::open(&config, Box::new(betline::MemoryStore::new())).await;
    let resolver = Resolver::new(config.economy.clone());

    ledger.get_or_create("alice").await;
    ledger.get_or_create("bob").await;

    let before = ledger.snapshot().await;
    let rows = betline::rank(&before, Metric::Cash, |_| true);
    // Equal cash: ids break the tie.
    assert_eq!(rows[0].user_id, "alice");

    // Bob wins a 35:1 roulette straight and takes the lead.
    let mut rng = ScriptedRandom::new([17]);
    let settlement = resolver
        .resolve(
            &GameParams::Roulette {
                bet: "17".parse().unwrap(),
            },
            100,
            &mut rng,
        )
        .unwrap();
    assert_eq!(settlement.cash_delta, 3500);
    ledger.apply("bob", &settlement).await;

    let after = ledger.snapshot().await;
    let rows = betline::rank(&after, Metric::Cash, |_| true);
    assert_eq!(rows[0].user_id, "bob");
    assert_eq!(rows[0].value, 4500);
    assert_eq!(betline::standing(&after, Metric::Cash, |_| true, "alice"), Some(2));
}
