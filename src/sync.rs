// O núcleo de sincronização: feed de objednávky com snapshots completos,
// reconciliação, rollups por dispečer e os helpers puros de filtro/ordenação.
// Sem axum nem sqlx aqui dentro.

pub mod bus;
pub mod feed;
pub mod reconcile;
pub mod rollup;
pub mod view;
pub mod window;

pub use bus::{ChangeBus, ChangeEvent, Collection};
pub use feed::{FeedState, OrderFeed, SnapshotSource, SubscriptionHandle};
pub use window::{DateWindow, StatsWindow};
