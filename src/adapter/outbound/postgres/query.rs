//! Windowed kline SQL.
//!
//! Window starts are aligned down: the 10 minute window to a 10 minute
//! boundary, the hourly windows to the hour. The 24 hour window covers
//! every kline of the last day.

/// Per-window first open and last close for the first `$2` coins quoted
/// in `$1`, ordered by coin id.
///
/// The 10 minute window also takes the kline that is still open at `NOW()`.
pub(super) const MOVEMENTS: &str = r#"
WITH bounds AS (
    SELECT to_timestamp(floor(extract(epoch FROM NOW() - INTERVAL '10 MINUTE') / 600) * 600) AS minute10,
           date_trunc('hour', NOW() - INTERVAL '1 HOUR')                                     AS hour,
           date_trunc('hour', NOW() - INTERVAL '4 HOUR')                                     AS hour4,
           date_trunc('hour', NOW() - INTERVAL '12 HOUR')                                    AS hour12
),
recent AS (
    SELECT c.id AS coin_id, c.code, c.rank, k.open, k.close, k.open_time, k.close_time
    FROM klines AS k
             INNER JOIN coins_pairs AS cp ON cp.id = k.coin_pair_id
             INNER JOIN coins AS c ON c.id = cp.coin_id
    WHERE cp.couple = $1
      AND c.is_enabled = 1
      AND cp.is_enabled = 1
      AND k.open_time >= NOW() - INTERVAL '1 DAY'
)
SELECT t.coin_id::bigint AS coin_id,
       t.code::text      AS code,
       t.rank::integer   AS rank,
       ((array_agg(t.open ORDER BY t.open_time ASC)
            FILTER (WHERE t.open_time >= b.minute10 OR t.close_time >= NOW()))[1])::double precision  AS minute10_open,
       ((array_agg(t.close ORDER BY t.open_time DESC)
            FILTER (WHERE t.open_time >= b.minute10 OR t.close_time >= NOW()))[1])::double precision  AS minute10_close,
       ((array_agg(t.open ORDER BY t.open_time ASC) FILTER (WHERE t.open_time >= b.hour))[1])::double precision    AS hour_open,
       ((array_agg(t.close ORDER BY t.open_time DESC) FILTER (WHERE t.open_time >= b.hour))[1])::double precision  AS hour_close,
       ((array_agg(t.open ORDER BY t.open_time ASC) FILTER (WHERE t.open_time >= b.hour4))[1])::double precision   AS hour4_open,
       ((array_agg(t.close ORDER BY t.open_time DESC) FILTER (WHERE t.open_time >= b.hour4))[1])::double precision AS hour4_close,
       ((array_agg(t.open ORDER BY t.open_time ASC) FILTER (WHERE t.open_time >= b.hour12))[1])::double precision  AS hour12_open,
       ((array_agg(t.close ORDER BY t.open_time DESC) FILTER (WHERE t.open_time >= b.hour12))[1])::double precision AS hour12_close,
       ((array_agg(t.open ORDER BY t.open_time ASC))[1])::double precision                                        AS hour24_open,
       ((array_agg(t.close ORDER BY t.open_time DESC))[1])::double precision                                      AS hour24_close
FROM recent AS t
         CROSS JOIN bounds AS b
GROUP BY t.coin_id, t.code, t.rank
ORDER BY t.coin_id
LIMIT $2
"#;

/// Lowest open and highest close per window for coin `$2` quoted in `$1`.
pub(super) const EXCHANGE_RATE: &str = r#"
WITH bounds AS (
    SELECT to_timestamp(floor(extract(epoch FROM NOW() - INTERVAL '10 MINUTE') / 600) * 600) AS minute10,
           date_trunc('hour', NOW() - INTERVAL '1 HOUR')                                     AS hour,
           date_trunc('hour', NOW() - INTERVAL '4 HOUR')                                     AS hour4,
           date_trunc('hour', NOW() - INTERVAL '12 HOUR')                                    AS hour12
),
recent AS (
    SELECT c.id AS coin_id, c.code, c.rank, k.open, k.close, k.open_time
    FROM klines AS k
             INNER JOIN coins_pairs AS cp ON cp.id = k.coin_pair_id
             INNER JOIN coins AS c ON c.id = cp.coin_id
    WHERE cp.couple = $1
      AND c.is_enabled = 1
      AND cp.is_enabled = 1
      AND k.open_time >= NOW() - INTERVAL '1 DAY'
      AND c.code = $2
)
SELECT t.coin_id::bigint AS coin_id,
       t.code::text      AS code,
       t.rank::integer   AS rank,
       (MIN(t.open) FILTER (WHERE t.open_time >= b.minute10))::double precision  AS minute10_min_open,
       (MAX(t.close) FILTER (WHERE t.open_time >= b.minute10))::double precision AS minute10_max_close,
       (MIN(t.open) FILTER (WHERE t.open_time >= b.hour))::double precision      AS hour_min_open,
       (MAX(t.close) FILTER (WHERE t.open_time >= b.hour))::double precision     AS hour_max_close,
       (MIN(t.open) FILTER (WHERE t.open_time >= b.hour4))::double precision     AS hour4_min_open,
       (MAX(t.close) FILTER (WHERE t.open_time >= b.hour4))::double precision    AS hour4_max_close,
       (MIN(t.open) FILTER (WHERE t.open_time >= b.hour12))::double precision    AS hour12_min_open,
       (MAX(t.close) FILTER (WHERE t.open_time >= b.hour12))::double precision   AS hour12_max_close,
       MIN(t.open)::double precision                                             AS hour24_min_open,
       MAX(t.close)::double precision                                            AS hour24_max_close
FROM recent AS t
         CROSS JOIN bounds AS b
GROUP BY t.coin_id, t.code, t.rank
LIMIT 1
"#;

/// Average daily open/close over the last `$2` days and the latest close,
/// for every enabled coin quoted in `$1`.
pub(super) const CONSOLIDATION: &str = r#"
WITH last_prices AS (
    SELECT DISTINCT ON (k.coin_pair_id) k.coin_pair_id, k.close
    FROM klines AS k
             INNER JOIN coins_pairs AS cp ON cp.id = k.coin_pair_id
             INNER JOIN coins AS c ON c.id = cp.coin_id
    WHERE cp.couple = $1
      AND c.is_enabled = 1
      AND cp.is_enabled = 1
    ORDER BY k.coin_pair_id, k.close_time DESC
),
daily AS (
    SELECT date_trunc('day', k.open_time) AS day,
           k.coin_pair_id,
           AVG(k.open)                    AS open,
           AVG(k.close)                   AS close
    FROM klines AS k
    WHERE k.open_time >= date_trunc('hour', NOW() - make_interval(days => $2))
    GROUP BY day, k.coin_pair_id
)
SELECT c.id::bigint                   AS coin_id,
       c.code::text                   AS code,
       c.rank::integer                AS rank,
       AVG(d.open)::double precision  AS avg_open,
       AVG(d.close)::double precision AS avg_close,
       lp.close::double precision     AS price
FROM coins AS c
         INNER JOIN coins_pairs AS cp ON cp.coin_id = c.id
         LEFT JOIN daily AS d ON d.coin_pair_id = cp.id
         LEFT JOIN last_prices AS lp ON lp.coin_pair_id = cp.id
WHERE cp.couple = $1
  AND c.is_enabled = 1
  AND cp.is_enabled = 1
GROUP BY c.id, c.code, c.rank, lp.close
ORDER BY c.rank
"#;
