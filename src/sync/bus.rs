// src/sync/bus.rs

use tokio::sync::broadcast;
use uuid::Uuid;

// Coleções observáveis. Cada escrita publica o tenant + a coleção tocada;
// quem subscreve decide se o evento lhe interessa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Orders,
    Customers,
    Carriers,
    Locations,
    Documents,
}

#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub company_id: Uuid,
    pub collection: Collection,
}

const DEFAULT_CAPACITY: usize = 256;

// Hub publish/subscribe in-process sobre tokio broadcast.
// O evento não carrega dados: o subscritor refaz o fetch do snapshot
// completo, que é a semântica de entrega do feed.
#[derive(Clone)]
pub struct ChangeBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn publish(&self, company_id: Uuid, collection: Collection) {
        // SendError só significa zero receptores; ignorar.
        let _ = self.sender.send(ChangeEvent {
            company_id,
            collection,
        });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
