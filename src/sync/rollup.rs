// src/sync/rollup.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::orders::{Order, parse_price};
use crate::models::stats::{DispatcherInfo, DispatcherRollup, UNKNOWN_DISPATCHER};

use super::window::StatsWindow;

struct Accumulator {
    name: String,
    email: Option<String>,
    count: u32,
    revenue: Decimal,
    costs: Decimal,
}

// Rollup por dispečer: função pura de (objednávky, janela, lookup, now).
// Recalcula tudo do zero a cada chamada: centenas de objednávky, não milhões.
// Objednávky sem createdBy ficam fora de todos os rollups.
pub fn dispatcher_rollups(
    orders: &[Order],
    window: StatsWindow,
    dispatchers: &HashMap<Uuid, DispatcherInfo>,
    now: DateTime<Utc>,
) -> Vec<DispatcherRollup> {
    let resolved = window.resolve(now);

    let mut by_user: HashMap<Uuid, Accumulator> = HashMap::new();

    for order in orders {
        if let Some(w) = &resolved {
            if !w.contains(order.created_at) {
                continue;
            }
        }
        let Some(user_id) = order.created_by else {
            continue;
        };

        let entry = by_user.entry(user_id).or_insert_with(|| {
            let info = dispatchers.get(&user_id);
            // Resolução do nome: createdByName denormalizado da própria
            // objednávka, senão a tabela de lookup, senão "Neznámy".
            let name = order
                .created_by_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .or_else(|| info.and_then(|i| i.name.clone()))
                .unwrap_or_else(|| UNKNOWN_DISPATCHER.to_string());
            Accumulator {
                name,
                email: info.and_then(|i| i.email.clone()),
                count: 0,
                revenue: Decimal::ZERO,
                costs: Decimal::ZERO,
            }
        });

        entry.count += 1;
        entry.revenue += parse_price(order.customer_price.as_deref());
        entry.costs += parse_price(order.carrier_price.as_deref());
    }

    by_user
        .into_iter()
        .map(|(user_id, acc)| {
            let profit = acc.revenue - acc.costs;
            let avg_profit = if acc.count == 0 {
                Decimal::ZERO
            } else {
                profit / Decimal::from(acc.count)
            };
            let avg_profit_margin = if acc.revenue.is_zero() {
                Decimal::ZERO
            } else {
                profit / acc.revenue * Decimal::from(100)
            };
            DispatcherRollup {
                user_id,
                name: acc.name,
                email: acc.email,
                total_orders: acc.count,
                total_revenue: acc.revenue,
                total_costs: acc.costs,
                total_profit: profit,
                avg_profit,
                avg_profit_margin,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::orders::test_order;
    use crate::sync::window::DateWindow;
    use chrono::{NaiveDate, TimeZone};

    fn order_by(
        user: Uuid,
        customer_price: &str,
        carrier_price: &str,
        created_at: DateTime<Utc>,
    ) -> Order {
        let mut order = test_order();
        order.created_by = Some(user);
        order.customer_price = Some(customer_price.to_string());
        order.carrier_price = Some(carrier_price.to_string());
        order.created_at = created_at;
        order
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn rollup_arithmetic() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let now = Utc::now();

        let orders = vec![
            order_by(a, "100", "60", now),
            order_by(a, "50", "50", now),
            order_by(b, "200", "0", now),
        ];

        let rollups = dispatcher_rollups(&orders, StatsWindow::All, &HashMap::new(), now);
        assert_eq!(rollups.len(), 2);

        let for_a = rollups.iter().find(|r| r.user_id == a).unwrap();
        assert_eq!(for_a.total_orders, 2);
        assert_eq!(for_a.total_revenue, dec("150"));
        assert_eq!(for_a.total_costs, dec("110"));
        assert_eq!(for_a.total_profit, dec("40"));
        assert_eq!(for_a.avg_profit, dec("20"));
        assert_eq!(for_a.avg_profit_margin.round_dp(2), dec("26.67"));

        let for_b = rollups.iter().find(|r| r.user_id == b).unwrap();
        assert_eq!(for_b.total_profit, dec("200"));
        assert_eq!(for_b.avg_profit_margin, dec("100"));
    }

    #[test]
    fn orders_without_created_by_are_excluded() {
        let now = Utc::now();
        let mut anonymous = test_order();
        anonymous.customer_price = Some("999".to_string());

        let rollups = dispatcher_rollups(&[anonymous], StatsWindow::All, &HashMap::new(), now);
        assert!(rollups.is_empty());
    }

    #[test]
    fn malformed_price_counts_as_zero() {
        let a = Uuid::new_v4();
        let now = Utc::now();
        let orders = vec![order_by(a, "abc", "30", now)];

        let rollups = dispatcher_rollups(&orders, StatsWindow::All, &HashMap::new(), now);
        let for_a = &rollups[0];
        assert_eq!(for_a.total_revenue, Decimal::ZERO);
        assert_eq!(for_a.total_profit, dec("-30"));
        // revenue 0 -> margem 0, nunca NaN nem divisão por zero
        assert_eq!(for_a.avg_profit_margin, Decimal::ZERO);
    }

    #[test]
    fn custom_window_includes_both_boundary_instants() {
        let a = Uuid::new_v4();
        let start_instant = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        let end_instant = Utc.with_ymd_and_hms(2026, 5, 31, 23, 59, 59).unwrap();
        let outside = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();

        let orders = vec![
            order_by(a, "10", "0", start_instant),
            order_by(a, "10", "0", end_instant),
            order_by(a, "10", "0", outside),
        ];

        let window = StatsWindow::Custom(DateWindow::new(
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 31).unwrap(),
        ));
        let rollups = dispatcher_rollups(&orders, window, &HashMap::new(), Utc::now());
        assert_eq!(rollups[0].total_orders, 2);
        assert_eq!(rollups[0].total_revenue, dec("20"));
    }

    #[test]
    fn this_month_filters_against_now() {
        let a = Uuid::new_v4();
        let now = Utc.with_ymd_and_hms(2026, 2, 10, 9, 0, 0).unwrap();
        let last_month = Utc.with_ymd_and_hms(2026, 1, 20, 9, 0, 0).unwrap();

        let orders = vec![
            order_by(a, "100", "0", now),
            order_by(a, "100", "0", last_month),
        ];

        let rollups = dispatcher_rollups(&orders, StatsWindow::ThisMonth, &HashMap::new(), now);
        assert_eq!(rollups[0].total_orders, 1);
    }

    #[test]
    fn name_resolution_order() {
        let with_lookup = Uuid::new_v4();
        let unknown = Uuid::new_v4();
        let now = Utc::now();

        let mut denormalized = order_by(Uuid::new_v4(), "1", "0", now);
        denormalized.created_by_name = Some("Eva Krátka".to_string());

        let mut lookup = HashMap::new();
        lookup.insert(
            with_lookup,
            DispatcherInfo {
                name: Some("Marek Dlhý".to_string()),
                email: Some("marek@dispo.sk".to_string()),
            },
        );

        let orders = vec![
            denormalized,
            order_by(with_lookup, "1", "0", now),
            order_by(unknown, "1", "0", now),
        ];

        let rollups = dispatcher_rollups(&orders, StatsWindow::All, &lookup, now);
        let names: Vec<&str> = rollups.iter().map(|r| r.name.as_str()).collect();
        assert!(names.contains(&"Eva Krátka"));
        assert!(names.contains(&"Marek Dlhý"));
        assert!(names.contains(&UNKNOWN_DISPATCHER));
    }
}
