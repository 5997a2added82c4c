// src/sync/view.rs

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::documents::OrderDocument;
use crate::models::orders::Order;
use crate::models::stats::UNKNOWN_DISPATCHER;

// =============================================================================
//  1. FILTRO
// =============================================================================

#[derive(Debug, Default, Clone)]
pub struct OrderFilter {
    // Texto livre; vazio = tudo passa
    pub query: String,
    // Filtro por tipo de documento anexado; independente do texto livre
    pub document_type: Option<String>,
}

// Match por substring, case-insensitive, com semântica OR sobre a lista
// enumerada de campos. Uma query vazia corresponde a tudo.
pub fn matches_search(
    order: &Order,
    query: &str,
    dispatcher_names: &HashMap<Uuid, String>,
) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    let contains = |field: &str| field.to_lowercase().contains(&query);

    if let Some(company) = &order.customer_company {
        if contains(company) {
            return true;
        }
    }
    if let Some(person) = order.contact_person() {
        if contains(&person) {
            return true;
        }
    }
    if let Some(name) = resolved_dispatcher_name(order, dispatcher_names) {
        if contains(&name) {
            return true;
        }
    }
    if contains(&order.order_number_formatted) {
        return true;
    }
    if let Some(vat) = &order.customer_vat_id {
        if contains(vat) {
            return true;
        }
    }
    for field in [
        &order.carrier_company,
        &order.carrier_contact,
        &order.carrier_vehicle_reg,
    ] {
        if let Some(value) = field {
            if contains(value) {
                return true;
            }
        }
    }
    if let Some(stop) = order.loading_places.first() {
        if contains(&stop.city) {
            return true;
        }
    }
    for stop in &order.loading_places {
        if stop.contact_name.as_deref().is_some_and(contains)
            || stop.contact_phone.as_deref().is_some_and(contains)
        {
            return true;
        }
    }
    if let Some(stop) = order.unloading_places.first() {
        if contains(&stop.city) {
            return true;
        }
    }
    for stop in &order.unloading_places {
        if stop.contact_name.as_deref().is_some_and(contains)
            || stop.contact_phone.as_deref().is_some_and(contains)
        {
            return true;
        }
    }
    if contains(&order.id.to_string()) {
        return true;
    }

    false
}

fn resolved_dispatcher_name(
    order: &Order,
    dispatcher_names: &HashMap<Uuid, String>,
) -> Option<String> {
    if let Some(name) = &order.created_by_name {
        if !name.trim().is_empty() {
            return Some(name.clone());
        }
    }
    let user_id = order.created_by?;
    Some(
        dispatcher_names
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_DISPATCHER.to_string()),
    )
}

// Passa só se pelo menos um documento anexado tiver um rótulo de tipo que
// contenha o texto do filtro. Sem documentos = excluída, mesmo que o
// texto livre corresponda.
pub fn matches_document_filter(
    order_id: Uuid,
    filter: &str,
    documents_by_order: &HashMap<Uuid, Vec<OrderDocument>>,
) -> bool {
    let filter = filter.trim().to_lowercase();
    if filter.is_empty() {
        return true;
    }
    documents_by_order
        .get(&order_id)
        .is_some_and(|docs| {
            docs.iter()
                .any(|d| d.doc_type.label().to_lowercase().contains(&filter))
        })
}

// Composição AND dos dois filtros, OR dentro do texto livre.
pub fn filter_orders<'a>(
    orders: &'a [Order],
    filter: &OrderFilter,
    documents_by_order: &HashMap<Uuid, Vec<OrderDocument>>,
    dispatcher_names: &HashMap<Uuid, String>,
) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|o| matches_search(o, &filter.query, dispatcher_names))
        .filter(|o| match &filter.document_type {
            Some(doc_filter) => matches_document_filter(o.id, doc_filter, documents_by_order),
            None => true,
        })
        .collect()
}

// =============================================================================
//  2. ORDENAÇÃO
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    OrderNumber,
    CreatedAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::OrderNumber => "orderNumber",
            SortField::CreatedAt => "createdAt",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "orderNumber" => Some(SortField::OrderNumber),
            "createdAt" => Some(SortField::CreatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Desc,
    Asc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Desc => "desc",
            SortDirection::Asc => "asc",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "desc" => Some(SortDirection::Desc),
            "asc" => Some(SortDirection::Asc),
            _ => None,
        }
    }
}

// Estado da ordenação. No máximo um campo ativo de cada vez; None = ordem
// natural do feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState(pub Option<(SortField, SortDirection)>);

impl SortState {
    // Restaura das duas chaves persistidas, lidas uma vez na inicialização.
    pub fn restore(field: Option<&str>, direction: Option<&str>) -> Self {
        match (
            field.and_then(SortField::parse),
            direction.and_then(SortDirection::parse),
        ) {
            (Some(f), Some(d)) => SortState(Some((f, d))),
            _ => SortState(None),
        }
    }

    // O par a persistir; None manda limpar as duas chaves.
    pub fn persisted(&self) -> Option<(&'static str, &'static str)> {
        self.0.map(|(f, d)| (f.as_str(), d.as_str()))
    }

    // Clique no cabeçalho: no mesmo campo cicla
    // sem ordenação -> desc -> asc -> sem ordenação;
    // num campo diferente começa logo em desc.
    pub fn toggle(&mut self, field: SortField) {
        self.0 = match self.0 {
            Some((f, SortDirection::Desc)) if f == field => Some((field, SortDirection::Asc)),
            Some((f, SortDirection::Asc)) if f == field => None,
            _ => Some((field, SortDirection::Desc)),
        };
    }
}

// A ordenação aplica-se só ao subconjunto "de cliente" (customerCompany
// preenchido); o resto das objednávky nunca entra nesta vista.
pub fn customer_orders<'a>(orders: &[&'a Order]) -> Vec<&'a Order> {
    orders
        .iter()
        .copied()
        .filter(|o| o.customer_company.as_deref().is_some_and(|c| !c.is_empty()))
        .collect()
}

// Sort estável: com o estado em None a ordem do feed fica intacta.
pub fn sort_orders(orders: &mut [&Order], state: SortState) {
    use std::cmp::Reverse;

    let Some((field, direction)) = state.0 else {
        return;
    };
    let key = |o: &Order| -> i64 {
        match field {
            SortField::OrderNumber => o.order_number_numeric(),
            SortField::CreatedAt => o.created_at.timestamp_millis(),
        }
    };
    match direction {
        SortDirection::Asc => orders.sort_by_key(|o| key(o)),
        SortDirection::Desc => orders.sort_by_key(|o| Reverse(key(o))),
    }
}

// =============================================================================
//  3. PAGINAÇÃO
// =============================================================================

pub const PAGE_SIZES: &[usize] = &[10, 25, 50, 100];

// Janela offset/limit aplicada depois de filtrar e ordenar. Cada tabela
// lógica tem o seu pager; só o índice da página vive aqui (nunca persistido).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TablePager {
    page_size: usize,
    page_index: usize,
}

impl TablePager {
    pub fn new(page_size: usize) -> Self {
        let page_size = if PAGE_SIZES.contains(&page_size) {
            page_size
        } else {
            25
        };
        Self {
            page_size,
            page_index: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn set_page(&mut self, index: usize) {
        self.page_index = index;
    }

    // Mudar o tamanho da página volta sempre à página 0.
    pub fn set_page_size(&mut self, page_size: usize) {
        if PAGE_SIZES.contains(&page_size) {
            self.page_size = page_size;
            self.page_index = 0;
        }
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.page_index * self.page_size;
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}

impl Default for TablePager {
    fn default() -> Self {
        Self::new(25)
    }
}

// Um pager por tabela lógica; cada um lembra apenas o seu próprio índice.
#[derive(Debug, Clone, Copy, Default)]
pub struct TablePagers {
    pub orders: TablePager,
    pub customers: TablePager,
    pub carriers: TablePager,
    pub locations: TablePager,
    pub dispatchers: TablePager,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::documents::{DocumentKind, OrderDocument};
    use crate::models::orders::{RouteStop, test_order};
    use chrono::{Duration, Utc};

    fn stop(city: &str, contact: Option<(&str, &str)>) -> RouteStop {
        RouteStop {
            street: None,
            city: city.to_string(),
            zip: None,
            country: None,
            date_time: None,
            contact_name: contact.map(|(n, _)| n.to_string()),
            contact_phone: contact.map(|(_, p)| p.to_string()),
            goods: vec![],
        }
    }

    fn searchable_order() -> Order {
        let mut order = test_order();
        order.customer_company = Some("Pekáreň Tatry s.r.o.".to_string());
        order.customer_vat_id = Some("SK2020123456".to_string());
        order.carrier_company = Some("Kamión Expres".to_string());
        order.carrier_contact = Some("Milan".to_string());
        order.carrier_vehicle_reg = Some("ZA-456CD".to_string());
        order.order_number_formatted = "2026-0042".to_string();
        order.loading_places = vec![stop("Žilina", Some(("Ivan", "+421900111222")))];
        order.unloading_places = vec![stop("Brno", Some(("Petra", "+420601333444")))];
        order
    }

    fn document(order_id: Uuid, kind: DocumentKind) -> OrderDocument {
        OrderDocument {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            order_id,
            doc_type: kind,
            file_name: "subor.pdf".to_string(),
            file_url: "/files/subor.pdf".to_string(),
            storage_path: "files/subor.pdf".to_string(),
            uploaded_by: None,
            created_at: Utc::now(),
        }
    }

    // --- texto livre -------------------------------------------------------

    #[test]
    fn search_matches_any_enumerated_field() {
        let order = searchable_order();
        let names = HashMap::new();

        // OR: basta um campo corresponder
        assert!(matches_search(&order, "pekáreň", &names));
        assert!(matches_search(&order, "sk2020", &names));
        assert!(matches_search(&order, "kamión", &names));
        assert!(matches_search(&order, "za-456", &names));
        assert!(matches_search(&order, "žilina", &names));
        assert!(matches_search(&order, "brno", &names));
        assert!(matches_search(&order, "+421900111222", &names));
        assert!(matches_search(&order, "petra", &names));
        assert!(matches_search(&order, "0042", &names));
    }

    #[test]
    fn search_misses_when_no_field_contains_query() {
        let order = searchable_order();
        assert!(!matches_search(&order, "neexistujúci", &HashMap::new()));
    }

    #[test]
    fn empty_query_matches_everything() {
        let order = test_order();
        assert!(matches_search(&order, "", &HashMap::new()));
        assert!(matches_search(&order, "   ", &HashMap::new()));
    }

    #[test]
    fn search_resolves_dispatcher_name_via_lookup() {
        let user = Uuid::new_v4();
        let mut order = searchable_order();
        order.created_by = Some(user);
        order.created_by_name = None;

        let mut names = HashMap::new();
        names.insert(user, "Marek Dlhý".to_string());

        assert!(matches_search(&order, "marek", &names));
    }

    // --- filtro de documentos ----------------------------------------------

    #[test]
    fn document_filter_and_semantics() {
        let mut order = searchable_order();
        order.id = Uuid::new_v4();
        let orders = vec![order.clone()];

        let mut docs = HashMap::new();
        docs.insert(order.id, vec![document(order.id, DocumentKind::Invoice)]);

        let names = HashMap::new();

        // texto livre ok + documento ok -> entra
        let filter = OrderFilter {
            query: "pekáreň".to_string(),
            document_type: Some("faktúra".to_string()),
        };
        assert_eq!(filter_orders(&orders, &filter, &docs, &names).len(), 1);

        // texto livre ok + documento errado -> fora
        let filter = OrderFilter {
            query: "pekáreň".to_string(),
            document_type: Some("cmr".to_string()),
        };
        assert_eq!(filter_orders(&orders, &filter, &docs, &names).len(), 0);

        // texto livre falha + documento ok -> fora
        let filter = OrderFilter {
            query: "nikde".to_string(),
            document_type: Some("faktúra".to_string()),
        };
        assert_eq!(filter_orders(&orders, &filter, &docs, &names).len(), 0);
    }

    #[test]
    fn order_without_documents_is_excluded_by_document_filter() {
        let order = searchable_order();
        let orders = vec![order];
        let filter = OrderFilter {
            query: String::new(),
            document_type: Some("faktúra".to_string()),
        };
        assert_eq!(
            filter_orders(&orders, &filter, &HashMap::new(), &HashMap::new()).len(),
            0
        );
    }

    // --- ciclo de ordenação ------------------------------------------------

    #[test]
    fn sort_cycle_on_same_field() {
        let mut state = SortState::default();

        state.toggle(SortField::OrderNumber);
        assert_eq!(
            state.0,
            Some((SortField::OrderNumber, SortDirection::Desc))
        );
        assert_eq!(state.persisted(), Some(("orderNumber", "desc")));

        state.toggle(SortField::OrderNumber);
        assert_eq!(state.0, Some((SortField::OrderNumber, SortDirection::Asc)));

        state.toggle(SortField::OrderNumber);
        assert_eq!(state.0, None);
        // voltar ao estado sem ordenação limpa as chaves persistidas
        assert_eq!(state.persisted(), None);
    }

    #[test]
    fn switching_field_resets_to_desc() {
        let mut state = SortState::default();
        state.toggle(SortField::OrderNumber);
        state.toggle(SortField::CreatedAt);
        assert_eq!(state.0, Some((SortField::CreatedAt, SortDirection::Desc)));
    }

    #[test]
    fn restore_requires_both_keys() {
        assert_eq!(
            SortState::restore(Some("orderNumber"), Some("asc")).0,
            Some((SortField::OrderNumber, SortDirection::Asc))
        );
        assert_eq!(SortState::restore(Some("orderNumber"), None).0, None);
        assert_eq!(SortState::restore(Some("lixo"), Some("desc")).0, None);
    }

    #[test]
    fn sort_orders_by_number_and_back_to_feed_order() {
        let mut first = searchable_order();
        first.order_number_formatted = "2026-0002".to_string();
        let mut second = searchable_order();
        second.order_number_formatted = "2026-0010".to_string();
        let mut third = searchable_order();
        third.order_number_formatted = "2026-0001".to_string();

        let orders = vec![first, second, third];
        let refs: Vec<&Order> = orders.iter().collect();
        let mut view = customer_orders(&refs);

        let mut state = SortState::default();
        state.toggle(SortField::OrderNumber);
        sort_orders(&mut view, state);
        let numbers: Vec<&str> = view
            .iter()
            .map(|o| o.order_number_formatted.as_str())
            .collect();
        assert_eq!(numbers, ["2026-0010", "2026-0002", "2026-0001"]);

        state.toggle(SortField::OrderNumber);
        let mut view = customer_orders(&refs);
        sort_orders(&mut view, state);
        let numbers: Vec<&str> = view
            .iter()
            .map(|o| o.order_number_formatted.as_str())
            .collect();
        assert_eq!(numbers, ["2026-0001", "2026-0002", "2026-0010"]);

        // terceiro clique: ordem natural do feed
        state.toggle(SortField::OrderNumber);
        let mut view = customer_orders(&refs);
        sort_orders(&mut view, state);
        let numbers: Vec<&str> = view
            .iter()
            .map(|o| o.order_number_formatted.as_str())
            .collect();
        assert_eq!(numbers, ["2026-0002", "2026-0010", "2026-0001"]);
    }

    #[test]
    fn sort_by_created_at() {
        let base = Utc::now();
        let mut older = searchable_order();
        older.created_at = base - Duration::days(2);
        let mut newer = searchable_order();
        newer.created_at = base;

        let orders = vec![older.clone(), newer.clone()];
        let refs: Vec<&Order> = orders.iter().collect();
        let mut view = customer_orders(&refs);

        sort_orders(
            &mut view,
            SortState(Some((SortField::CreatedAt, SortDirection::Desc))),
        );
        assert_eq!(view[0].id, newer.id);
        assert_eq!(view[1].id, older.id);
    }

    #[test]
    fn orders_without_customer_company_stay_out_of_the_sorted_view() {
        let with_customer = searchable_order();
        let without_customer = test_order();

        let orders = vec![with_customer, without_customer];
        let refs: Vec<&Order> = orders.iter().collect();
        assert_eq!(customer_orders(&refs).len(), 1);
    }

    // --- paginação ----------------------------------------------------------

    #[test]
    fn pager_slices_after_filter_and_sort() {
        let items: Vec<u32> = (0..60).collect();
        let mut pager = TablePager::new(25);

        assert_eq!(pager.slice(&items), (0..25).collect::<Vec<_>>());
        pager.set_page(2);
        assert_eq!(pager.slice(&items), (50..60).collect::<Vec<_>>());
        pager.set_page(5);
        assert!(pager.slice(&items).is_empty());
    }

    #[test]
    fn changing_page_size_resets_the_index() {
        let mut pager = TablePager::new(10);
        pager.set_page(3);
        pager.set_page_size(50);
        assert_eq!(pager.page_index(), 0);
        assert_eq!(pager.page_size(), 50);
    }

    #[test]
    fn each_table_keeps_its_own_page() {
        let mut pagers = TablePagers::default();
        pagers.orders.set_page(4);
        assert_eq!(pagers.orders.page_index(), 4);
        assert_eq!(pagers.customers.page_index(), 0);
    }
}
