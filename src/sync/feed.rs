// src/sync/feed.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{Notify, watch};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::orders::Order;

use super::bus::{ChangeBus, Collection};
use super::reconcile::reconcile;
use super::window::DateWindow;

// Fonte de snapshots completos. O repositório de objednávky implementa
// isto por cima do Postgres; os testes usam uma fonte em memória.
#[async_trait]
pub trait SnapshotSource: Send + Sync + 'static {
    async fn fetch(
        &self,
        company_id: Uuid,
        window: Option<DateWindow>,
    ) -> Result<Vec<Order>, AppError>;
}

// Tentativas antes de assentar em estado failed (sem loading infinito).
const MAX_FETCH_ATTEMPTS: u32 = 4;
const RETRY_BASE_DELAY_MS: u64 = 250;

// O que o feed publica no canal watch.
#[derive(Debug, Clone)]
pub struct FeedState {
    pub orders: Arc<Vec<Order>>,
    pub loading: bool,
    pub failed: bool,
    pub missing_tenant: bool,
}

impl FeedState {
    fn loading() -> Self {
        Self {
            orders: Arc::new(Vec::new()),
            loading: true,
            failed: false,
            missing_tenant: false,
        }
    }

    fn missing_tenant() -> Self {
        Self {
            orders: Arc::new(Vec::new()),
            loading: false,
            failed: false,
            missing_tenant: true,
        }
    }

    fn ready(orders: Arc<Vec<Order>>) -> Self {
        Self {
            orders,
            loading: false,
            failed: false,
            missing_tenant: false,
        }
    }

    fn failed(orders: Arc<Vec<Order>>) -> Self {
        Self {
            orders,
            loading: false,
            failed: true,
            missing_tenant: false,
        }
    }
}

// Handle de cancelamento da subscrição. cancel() é idempotente; depois
// de cancelado nenhum snapshot volta a tocar no estado publicado.
pub struct SubscriptionHandle {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
    // Mantém o watch vivo nos feeds que nunca chegam a ter task (sem tenant).
    _keepalive: Option<watch::Sender<FeedState>>,
}

impl SubscriptionHandle {
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

// Subscrições abandonadas não podem ficar a correr para sempre.
impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub struct OrderFeed;

impl OrderFeed {
    // Abre a subscrição viva para (tenant, janela). Sem tenant resolvido
    // não se abre nada: o estado "missing_tenant" sai imediatamente.
    pub fn spawn(
        source: Arc<dyn SnapshotSource>,
        bus: &ChangeBus,
        company_id: Option<Uuid>,
        window: Option<DateWindow>,
    ) -> (watch::Receiver<FeedState>, SubscriptionHandle) {
        let cancelled = Arc::new(AtomicBool::new(false));
        let notify = Arc::new(Notify::new());

        let Some(company_id) = company_id else {
            let (tx, rx) = watch::channel(FeedState::missing_tenant());
            let handle = SubscriptionHandle {
                cancelled,
                notify,
                _keepalive: Some(tx),
            };
            return (rx, handle);
        };

        let (tx, rx) = watch::channel(FeedState::loading());
        let handle = SubscriptionHandle {
            cancelled: cancelled.clone(),
            notify: notify.clone(),
            _keepalive: None,
        };

        let mut events = bus.subscribe();
        tokio::spawn(async move {
            let mut current: Arc<Vec<Order>> = Arc::new(Vec::new());

            // Primeiro snapshot
            match fetch_with_retry(source.as_ref(), company_id, window).await {
                Ok(snapshot) => {
                    if cancelled.load(Ordering::SeqCst) {
                        return;
                    }
                    current = reconcile(&current, snapshot);
                    let _ = tx.send(FeedState::ready(current.clone()));
                }
                Err(e) => {
                    tracing::error!("Feed de objednávky falhou no snapshot inicial: {}", e);
                    if !cancelled.load(Ordering::SeqCst) {
                        let _ = tx.send(FeedState::failed(current));
                    }
                    return;
                }
            }

            loop {
                // Regista o waiter ANTES de reler a flag; um cancel entre
                // os dois passos nunca fica perdido.
                let notified = notify.notified();
                tokio::pin!(notified);
                notified.as_mut().enable();
                if cancelled.load(Ordering::SeqCst) {
                    return;
                }

                let refetch = tokio::select! {
                    _ = notified => return,
                    event = events.recv() => match event {
                        Ok(ev) => ev.company_id == company_id && ev.collection == Collection::Orders,
                        // Perdemos eventos: refaz o snapshot na mesma,
                        // "mudou a mais" é sempre seguro.
                        Err(RecvError::Lagged(_)) => true,
                        Err(RecvError::Closed) => return,
                    },
                };

                if !refetch {
                    continue;
                }

                match fetch_with_retry(source.as_ref(), company_id, window).await {
                    Ok(snapshot) => {
                        let next = reconcile(&current, snapshot);
                        // Mesma referência = snapshot logicamente idêntico;
                        // nada desce para os consumidores.
                        if !Arc::ptr_eq(&next, &current) {
                            current = next;
                            if cancelled.load(Ordering::SeqCst) {
                                return;
                            }
                            let _ = tx.send(FeedState::ready(current.clone()));
                        }
                    }
                    Err(e) => {
                        tracing::error!("Feed de objednávky desistiu após retries: {}", e);
                        if !cancelled.load(Ordering::SeqCst) {
                            let _ = tx.send(FeedState::failed(current));
                        }
                        return;
                    }
                }
            }
        });

        (rx, handle)
    }
}

// Backoff exponencial limitado: 250ms, 500ms, 1s entre as tentativas.
async fn fetch_with_retry(
    source: &dyn SnapshotSource,
    company_id: Uuid,
    window: Option<DateWindow>,
) -> Result<Vec<Order>, AppError> {
    let mut attempt: u32 = 0;
    loop {
        match source.fetch(company_id, window).await {
            Ok(snapshot) => return Ok(snapshot),
            Err(e) if attempt + 1 >= MAX_FETCH_ATTEMPTS => return Err(e),
            Err(e) => {
                tracing::warn!(
                    "Fetch do snapshot falhou (tentativa {}): {}",
                    attempt + 1,
                    e
                );
                tokio::time::sleep(Duration::from_millis(RETRY_BASE_DELAY_MS << attempt)).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::orders::test_order;
    use crate::sync::bus::ChangeBus;
    use std::sync::Mutex;

    // Fonte em memória: devolve o que lá estiver no momento do fetch.
    struct MemorySource {
        orders: Mutex<Vec<Order>>,
        fail: AtomicBool,
    }

    impl MemorySource {
        fn new(orders: Vec<Order>) -> Arc<Self> {
            Arc::new(Self {
                orders: Mutex::new(orders),
                fail: AtomicBool::new(false),
            })
        }

        fn set_orders(&self, orders: Vec<Order>) {
            *self.orders.lock().unwrap() = orders;
        }
    }

    #[async_trait]
    impl SnapshotSource for MemorySource {
        async fn fetch(
            &self,
            company_id: Uuid,
            _window: Option<DateWindow>,
        ) -> Result<Vec<Order>, AppError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(AppError::InternalServerError(anyhow::anyhow!(
                    "fonte indisponível"
                )));
            }
            let orders = self.orders.lock().unwrap();
            Ok(orders
                .iter()
                .filter(|o| o.company_id == company_id)
                .cloned()
                .collect())
        }
    }

    fn order_for(company_id: Uuid) -> Order {
        let mut order = test_order();
        order.company_id = company_id;
        order.customer_company = Some("Zákazník".to_string());
        order
    }

    async fn wait_ready(rx: &mut watch::Receiver<FeedState>) -> FeedState {
        loop {
            let state = rx.borrow().clone();
            if !state.loading {
                return state;
            }
            rx.changed().await.expect("feed terminou antes de pronto");
        }
    }

    #[tokio::test]
    async fn missing_tenant_short_circuits() {
        let source = MemorySource::new(vec![]);
        let bus = ChangeBus::default();

        let (rx, handle) = OrderFeed::spawn(source, &bus, None, None);
        let state = rx.borrow().clone();

        assert!(state.missing_tenant);
        assert!(!state.loading);
        assert!(state.orders.is_empty());

        // cancel é idempotente mesmo sem task
        handle.cancel();
        handle.cancel();
    }

    #[tokio::test]
    async fn delivers_initial_snapshot() {
        let company = Uuid::new_v4();
        let source = MemorySource::new(vec![order_for(company)]);
        let bus = ChangeBus::default();

        let (mut rx, _handle) = OrderFeed::spawn(source, &bus, Some(company), None);
        let state = wait_ready(&mut rx).await;

        assert!(!state.loading);
        assert_eq!(state.orders.len(), 1);
    }

    #[tokio::test]
    async fn republishes_on_change_event() {
        let company = Uuid::new_v4();
        let first = order_for(company);
        let source = MemorySource::new(vec![first.clone()]);
        let bus = ChangeBus::default();

        let (mut rx, _handle) = OrderFeed::spawn(source.clone(), &bus, Some(company), None);
        wait_ready(&mut rx).await;

        source.set_orders(vec![first, order_for(company)]);
        bus.publish(company, Collection::Orders);

        rx.changed().await.expect("esperava novo snapshot");
        assert_eq!(rx.borrow().orders.len(), 2);
    }

    #[tokio::test]
    async fn identical_snapshot_is_not_republished() {
        let company = Uuid::new_v4();
        let source = MemorySource::new(vec![order_for(company)]);
        let bus = ChangeBus::default();

        let (mut rx, _handle) = OrderFeed::spawn(source, &bus, Some(company), None);
        wait_ready(&mut rx).await;

        // evento sem mudança real nos dados
        bus.publish(company, Collection::Orders);

        let outcome =
            tokio::time::timeout(Duration::from_millis(100), rx.changed()).await;
        assert!(outcome.is_err(), "snapshot idêntico não deve ser publicado");
    }

    #[tokio::test]
    async fn events_of_other_tenants_are_ignored() {
        let company = Uuid::new_v4();
        let other = Uuid::new_v4();
        let source = MemorySource::new(vec![order_for(company)]);
        let bus = ChangeBus::default();

        let (mut rx, _handle) = OrderFeed::spawn(source.clone(), &bus, Some(company), None);
        wait_ready(&mut rx).await;

        // mudança de dados + evento de outro tenant: nada desce
        source.set_orders(vec![order_for(company), order_for(company)]);
        bus.publish(other, Collection::Orders);

        let outcome =
            tokio::time::timeout(Duration::from_millis(100), rx.changed()).await;
        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn cancelled_feed_never_mutates_the_store_again() {
        let company = Uuid::new_v4();
        let first = order_for(company);
        let source = MemorySource::new(vec![first.clone()]);
        let bus = ChangeBus::default();

        let (mut rx, handle) = OrderFeed::spawn(source.clone(), &bus, Some(company), None);
        let before = wait_ready(&mut rx).await;
        assert_eq!(before.orders.len(), 1);

        handle.cancel();
        handle.cancel(); // idempotente

        // mudança real depois do cancel
        source.set_orders(vec![first, order_for(company)]);
        bus.publish(company, Collection::Orders);
        tokio::time::sleep(Duration::from_millis(100)).await;

        let after = rx.borrow().clone();
        assert_eq!(after.orders.len(), 1);
        assert!(Arc::ptr_eq(&before.orders, &after.orders));
    }

    #[tokio::test]
    async fn failing_source_settles_into_failed_state() {
        let company = Uuid::new_v4();
        let source = MemorySource::new(vec![]);
        source.fail.store(true, Ordering::SeqCst);
        let bus = ChangeBus::default();

        let (mut rx, _handle) = OrderFeed::spawn(source, &bus, Some(company), None);
        let state = wait_ready(&mut rx).await;

        assert!(state.failed);
        assert!(!state.loading);
    }
}
