// src/services/pdf_service.rs

use genpdf::{Element, elements, style};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::i18n::I18nStore,
    db::OrdersRepository,
    models::orders::{Order, RouteStop},
};

#[derive(Clone)]
pub struct PdfService {
    orders_repo: OrdersRepository,
    i18n: I18nStore,
    pool: PgPool,
}

impl PdfService {
    pub fn new(orders_repo: OrdersRepository, i18n: I18nStore, pool: PgPool) -> Self {
        Self {
            orders_repo,
            i18n,
            pool,
        }
    }

    // Gera o PDF da objednávka no idioma pedido (sk/en/de/cs/pl).
    // Devolve (bytes, nome do ficheiro).
    pub async fn generate_order_pdf(
        &self,
        company_id: Uuid,
        order_id: Uuid,
        lang: &str,
    ) -> Result<(Vec<u8>, String), AppError> {
        // 1. Busca os dados (re-fetch: a objednávka pode já não existir)
        let order = self
            .orders_repo
            .find_by_id(&self.pool, company_id, order_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("objednávka {}", order_id)))?;

        // 2. Configura o PDF
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let label = |key: &str| self.i18n.label(lang, key);

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("{} {}", label("pdf.title"), order.order_number_formatted));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new(format!(
                "{} {}",
                label("pdf.title"),
                order.order_number_formatted
            ))
            .styled(style::Style::new().bold().with_font_size(16)),
        );
        doc.push(elements::Paragraph::new(format!(
            "{}: {}",
            label("pdf.date"),
            order.created_at.format("%d.%m.%Y")
        )));
        if let Some(author) = &order.created_by_name {
            doc.push(elements::Paragraph::new(format!(
                "{}: {}",
                label("pdf.created_by"),
                author
            )));
        }
        doc.push(elements::Break::new(1.5));

        // --- ZÁKAZNÍK ---
        doc.push(
            elements::Paragraph::new(label("pdf.customer"))
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        if let Some(company) = &order.customer_company {
            doc.push(elements::Paragraph::new(company.clone()));
        }
        if let Some(person) = order.contact_person() {
            doc.push(elements::Paragraph::new(format!(
                "{}: {}",
                label("pdf.contact"),
                person
            )));
        }
        if let Some(vat) = &order.customer_vat_id {
            doc.push(elements::Paragraph::new(format!(
                "{}: {}",
                label("pdf.vat_id"),
                vat
            )));
        }
        if let Some(phone) = &order.customer_phone {
            doc.push(elements::Paragraph::new(format!(
                "{}: {}",
                label("pdf.phone"),
                phone
            )));
        }
        if let Some(price) = &order.customer_price {
            doc.push(elements::Paragraph::new(format!(
                "{}: {} EUR",
                label("pdf.price"),
                price
            )));
        }
        doc.push(elements::Break::new(1.0));

        // --- DOPRAVCA ---
        doc.push(
            elements::Paragraph::new(label("pdf.carrier"))
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        if let Some(company) = &order.carrier_company {
            doc.push(elements::Paragraph::new(company.clone()));
        }
        if let Some(contact) = &order.carrier_contact {
            doc.push(elements::Paragraph::new(format!(
                "{}: {}",
                label("pdf.contact"),
                contact
            )));
        }
        if let Some(reg) = &order.carrier_vehicle_reg {
            doc.push(elements::Paragraph::new(format!(
                "{}: {}",
                label("pdf.vehicle_reg"),
                reg
            )));
        }
        if let Some(price) = &order.carrier_price {
            doc.push(elements::Paragraph::new(format!(
                "{}: {} EUR",
                label("pdf.price"),
                price
            )));
        }
        doc.push(elements::Break::new(1.5));

        // --- ROTA ---
        self.push_stops(&mut doc, label("pdf.loading"), &order.loading_places, lang);
        self.push_stops(&mut doc, label("pdf.unloading"), &order.unloading_places, lang);

        // 3. Renderiza para Buffer (Memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok((buffer, pdf_file_name(&order, lang, &self.i18n)))
    }

    fn push_stops(
        &self,
        doc: &mut genpdf::Document,
        title: &str,
        stops: &[RouteStop],
        lang: &str,
    ) {
        if stops.is_empty() {
            return;
        }

        doc.push(
            elements::Paragraph::new(title).styled(style::Style::new().bold().with_font_size(12)),
        );

        for stop in stops {
            let mut line = stop.city.clone();
            if let Some(street) = &stop.street {
                line = format!("{}, {}", street, line);
            }
            if let Some(zip) = &stop.zip {
                line = format!("{} {}", line, zip);
            }
            if let Some(country) = &stop.country {
                line = format!("{} ({})", line, country);
            }
            if let Some(when) = &stop.date_time {
                line = format!("{}, {}", line, when.format("%d.%m.%Y %H:%M"));
            }
            doc.push(elements::Paragraph::new(line));

            if let Some(contact) = &stop.contact_name {
                let phone = stop.contact_phone.as_deref().unwrap_or("");
                doc.push(elements::Paragraph::new(format!(
                    "{}: {} {}",
                    self.i18n.label(lang, "pdf.contact"),
                    contact,
                    phone
                )));
            }

            // Tabela do tovar desta paragem
            if !stop.goods.is_empty() {
                let mut table = elements::TableLayout::new(vec![4, 2, 2]);
                table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

                let style_bold = style::Style::new().bold();
                table
                    .row()
                    .element(
                        elements::Paragraph::new(self.i18n.label(lang, "pdf.goods"))
                            .styled(style_bold),
                    )
                    .element(elements::Paragraph::new("Qty").styled(style_bold))
                    .element(elements::Paragraph::new("Kg").styled(style_bold))
                    .push()
                    .expect("Table error");

                for item in &stop.goods {
                    table
                        .row()
                        .element(elements::Paragraph::new(item.name.clone()))
                        .element(elements::Paragraph::new(
                            item.quantity.clone().unwrap_or_default(),
                        ))
                        .element(elements::Paragraph::new(
                            item.weight.clone().unwrap_or_default(),
                        ))
                        .push()
                        .expect("Table row error");
                }
                doc.push(table);
            }
            doc.push(elements::Break::new(0.5));
        }
        doc.push(elements::Break::new(1.0));
    }
}

// Nome do ficheiro localizado; cai para o número/id se não houver melhor.
fn pdf_file_name(order: &Order, lang: &str, i18n: &I18nStore) -> String {
    let prefix = i18n.label(lang, "pdf.file_prefix");
    let number = order.order_number_formatted.replace('-', "_");
    if number.is_empty() {
        format!("{}_{}.pdf", prefix, order.id)
    } else {
        format!("{}_{}.pdf", prefix, number)
    }
}
