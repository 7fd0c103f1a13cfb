//! Per-theme ranking over persisted game results.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;

use crate::domain::masking::mask_phone;
use crate::entities::game_sessions::GameStatus;
use crate::error::AppError;
use crate::protocol::{LeaderboardResponse, LeaderboardRow};
use crate::repos;

const TOP_N: usize = 10;

#[derive(Debug, Clone)]
struct UserAgg {
    user_id: String,
    phone: String,
    total: i64,
    wins: u32,
    losses: u32,
}

/// Aggregate WON/FAILED_GUESSES results by user, dense-rank by
/// (total desc, wins desc, losses asc) and return the top ten plus the
/// requesting user's own row when ranked.
pub async fn theme_leaderboard<C: ConnectionTrait>(
    conn: &C,
    theme_id: &str,
    user_id: &str,
) -> Result<LeaderboardResponse, AppError> {
    let results = repos::game_results::list_for_leaderboard(conn, theme_id).await?;

    let mut by_user: HashMap<String, (i64, u32, u32)> = HashMap::new();
    for r in &results {
        let entry = by_user.entry(r.user_id.clone()).or_default();
        match r.status {
            GameStatus::Won => {
                entry.0 += i64::from(r.score);
                entry.1 += 1;
            }
            GameStatus::FailedGuesses => entry.2 += 1,
            _ => {}
        }
    }

    let ids: Vec<String> = by_user.keys().cloned().collect();
    let phones: HashMap<String, String> = repos::users::list_by_ids(conn, &ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u.phone))
        .collect();

    let mut aggs: Vec<UserAgg> = by_user
        .into_iter()
        .map(|(uid, (total, wins, losses))| UserAgg {
            phone: phones.get(&uid).cloned().unwrap_or_default(),
            user_id: uid,
            total,
            wins,
            losses,
        })
        .collect();

    // Rank ordering, then phone ascending as the stable tie-break for display
    aggs.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then(b.wins.cmp(&a.wins))
            .then(a.losses.cmp(&b.losses))
            .then(a.phone.cmp(&b.phone))
    });

    // Dense ranking: equal (total, wins, losses) groups share a rank
    let mut ranked: Vec<(u32, UserAgg)> = Vec::with_capacity(aggs.len());
    let mut rank = 0u32;
    let mut prev: Option<(i64, u32, u32)> = None;
    for agg in aggs {
        let key = (agg.total, agg.wins, agg.losses);
        if prev != Some(key) {
            rank += 1;
            prev = Some(key);
        }
        ranked.push((rank, agg));
    }

    let me = ranked
        .iter()
        .find(|(_, a)| a.user_id == user_id)
        .map(|(rank, a)| row(*rank, a));
    let top10 = ranked.iter().take(TOP_N).map(|(r, a)| row(*r, a)).collect();

    Ok(LeaderboardResponse {
        theme_id: theme_id.to_string(),
        top10,
        me,
    })
}

fn row(rank: u32, agg: &UserAgg) -> LeaderboardRow {
    LeaderboardRow {
        rank,
        phone: mask_phone(&agg.phone),
        total_score: agg.total,
        wins: agg.wins,
        losses: agg.losses,
    }
}
