//! Integration tests for the valuation service.
//!
//! The end-to-end scenario runs against the mock gateway and needs no
//! network. Tests marked `#[ignore]` hit the real APIs and require a valid
//! SKYMAVIS_API_KEY environment variable; run them with:
//! `cargo test --test integration -- --ignored`

use rust_decimal_macros::dec;

use axie_valuer::api::battles::{BattleRecord, Fighter, RANKED_PVP};
use axie_valuer::api::{ApiClient, Gateway, LeaderboardEntry, MockGateway, TwinListing};
use axie_valuer::config::Config;
use axie_valuer::genes::{decode, CreatureSignature, Encoding, Genome};
use axie_valuer::pricing::{valuate_leaderboard, valuate_player};

/// Build a 512-bit genome whose six dominant genes are beast-class with the
/// given trait bits.
fn beast_genome(trait_bits: &str) -> Genome {
    const PART_OFFSETS: [usize; 6] = [149, 213, 277, 341, 405, 469];

    let mut bin = vec![0u8; 512];
    for offset in PART_OFFSETS {
        // Gene class bits stay 00000 (beast); trait bits sit after the
        // 4 skin bits, 5 class bits and 2 reserved bits.
        for (i, b) in trait_bits.bytes().enumerate() {
            bin[offset + 11 + i] = b - b'0';
        }
    }

    let hex: String = bin
        .chunks(4)
        .map(|nibble| {
            let v = nibble.iter().fold(0u32, |acc, b| (acc << 1) | *b as u32);
            char::from_digit(v, 16).expect("nibble")
        })
        .collect();

    Genome::new(hex)
}

fn signature_of(genome: &Genome) -> CreatureSignature {
    decode(genome, Encoding::B512).expect("test genome decodes")
}

fn offline_config() -> Config {
    Config {
        skymavis_api_key: "offline".to_string(),
        leaderboard_url: String::new(),
        battles_url: String::new(),
        fighters_url: String::new(),
        marketplace_url: String::new(),
        battle_limit: 5,
        leaderboard_page_size: 100,
        twin_inspect_size: 24,
        max_team_price: None,
        max_attempts: 5,
        retry_delay_ms: 1,
        http_timeout_ms: 10_000,
        http_pool_size: 10,
        metrics_enabled: false,
        metrics_port: 9090,
        rust_log: "info".to_string(),
        verbose: false,
    }
}

fn ranked_record(player: &str, fighters: &[u64]) -> BattleRecord {
    BattleRecord {
        client_ids: vec![player.to_string(), "opponent".to_string()],
        first_client_fighters: fighters
            .iter()
            .map(|&axie_id| Fighter {
                axie_id,
                gene: None,
            })
            .collect(),
        second_client_fighters: vec![],
        battle_type: RANKED_PVP.to_string(),
    }
}

fn listing(id: &str, price: rust_decimal::Decimal) -> TwinListing {
    TwinListing {
        listing_id: id.to_string(),
        price,
    }
}

/// Leaderboard page `[(rank=5, id=42)]`; 4 ranked records all fielding
/// {A, B, C}; twins listed for A and B but not C: the sweep prices nothing.
/// Listing C's twin afterwards prices the team exactly.
#[tokio::test]
async fn end_to_end_sweep_prices_all_or_nothing() {
    let config = offline_config();
    let gateway = MockGateway::new();

    gateway.set_leaderboard(vec![LeaderboardEntry {
        user_id: "42".to_string(),
        top_rank: 5,
    }]);
    gateway.set_battles("42", (0..4).map(|_| ranked_record("42", &[7, 8, 9])).collect());

    let genome_a = beast_genome("000001");
    let genome_b = beast_genome("000010");
    let genome_c = beast_genome("000011");
    gateway.set_genome(7, genome_a.clone());
    gateway.set_genome(8, genome_b.clone());
    gateway.set_genome(9, genome_c.clone());

    gateway.set_listings(&signature_of(&genome_a), vec![listing("a", dec!(10.0))]);
    gateway.set_listings(&signature_of(&genome_b), vec![listing("b", dec!(20.0))]);
    // No twin for C.

    let valuation = valuate_player(&gateway, &config, "42", 5).await.unwrap();
    assert_eq!(valuation, None);

    let report = valuate_leaderboard(&gateway, &config, 0, 1).await.unwrap();
    assert!(report.rows.is_empty());
    assert_eq!(report.stats.players_skipped, 1);

    // C's twin appears; the team now prices as a unit, exactly.
    gateway.set_listings(&signature_of(&genome_c), vec![listing("c", dec!(395.75))]);

    let report = valuate_leaderboard(&gateway, &config, 0, 1).await.unwrap();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].rank, 5);
    assert_eq!(report.rows[0].total_price, dec!(425.75));
}

// === Network tests (require SKYMAVIS_API_KEY) ===

/// Load the real config, with the production endpoints, when a key is set.
fn live_config() -> Option<Config> {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("SKYMAVIS_API_KEY").ok()?;
    if api_key.is_empty() || api_key == "changeme" {
        return None;
    }

    Config::load().ok()
}

#[tokio::test]
#[ignore = "requires SKYMAVIS_API_KEY"]
async fn leaderboard_first_page_is_ranked() {
    let config = match live_config() {
        Some(c) => c,
        None => {
            println!("Skipping: SKYMAVIS_API_KEY not set");
            return;
        }
    };

    let client = ApiClient::new(&config);
    let page = client.leaderboard_page(10, 1).await.unwrap();

    assert!(!page.is_empty(), "leaderboard page came back empty");
    for entry in &page {
        println!("#{} {}", entry.top_rank, entry.user_id);
        assert!(!entry.user_id.is_empty());
    }
}

#[tokio::test]
#[ignore = "requires SKYMAVIS_API_KEY"]
async fn genome_fetch_returns_a_supported_width() {
    let config = match live_config() {
        Some(c) => c,
        None => {
            println!("Skipping: SKYMAVIS_API_KEY not set");
            return;
        }
    };

    let client = ApiClient::new(&config);
    let genome = client.genome_of(1601978).await.unwrap();

    let encoding = Encoding::detect(&genome).unwrap();
    println!("genome width: {} hex digits", encoding.hex_len());

    match decode(&genome, encoding) {
        Ok(signature) => println!("decoded: {signature}"),
        Err(err) => println!("genome outside the shipped trait table: {err}"),
    }
}
