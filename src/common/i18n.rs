// src/common/i18n.rs

use crate::middleware::i18n::Locale;

// Catálogo de mensagens da API e rótulos de PDF.
// Idiomas suportados: sk, en, de, cs, pl. Fallback: en.
#[derive(Clone, Default)]
pub struct I18nStore;

pub const SUPPORTED_LANGUAGES: &[&str] = &["sk", "en", "de", "cs", "pl"];

impl I18nStore {
    pub fn new() -> Self {
        Self
    }

    pub fn is_supported(lang: &str) -> bool {
        SUPPORTED_LANGUAGES.contains(&lang)
    }

    pub fn msg(&self, locale: &Locale, key: &str) -> &'static str {
        let lang = if Self::is_supported(&locale.0) {
            locale.0.as_str()
        } else {
            "en"
        };
        Self::lookup(lang, key).unwrap_or_else(|| {
            // Chave sem tradução cai para o inglês.
            Self::lookup("en", key).unwrap_or(key_missing(key))
        })
    }

    // Rótulos do PDF usam o mesmo catálogo, mas com o idioma explícito
    // do pedido de geração em vez do Accept-Language.
    pub fn label(&self, lang: &str, key: &str) -> &'static str {
        let lang = if Self::is_supported(lang) { lang } else { "en" };
        Self::lookup(lang, key)
            .unwrap_or_else(|| Self::lookup("en", key).unwrap_or(key_missing(key)))
    }

    fn lookup(lang: &str, key: &str) -> Option<&'static str> {
        let msg = match (lang, key) {
            // --- Mensagens da API ---
            ("en", "validation") => "One or more fields are invalid",
            ("sk", "validation") => "Jedno alebo viac polí je neplatných",
            ("de", "validation") => "Ein oder mehrere Felder sind ungültig",
            ("cs", "validation") => "Jedno nebo více polí je neplatných",
            ("pl", "validation") => "Jedno lub więcej pól jest nieprawidłowych",

            ("en", "email_exists") => "This e-mail is already in use",
            ("sk", "email_exists") => "Tento e-mail sa už používa",
            ("de", "email_exists") => "Diese E-Mail wird bereits verwendet",
            ("cs", "email_exists") => "Tento e-mail se již používá",
            ("pl", "email_exists") => "Ten adres e-mail jest już używany",

            ("en", "invalid_credentials") => "Invalid e-mail or password",
            ("sk", "invalid_credentials") => "Neplatný e-mail alebo heslo",
            ("de", "invalid_credentials") => "Ungültige E-Mail oder Passwort",
            ("cs", "invalid_credentials") => "Neplatný e-mail nebo heslo",
            ("pl", "invalid_credentials") => "Nieprawidłowy e-mail lub hasło",

            ("en", "invalid_token") => "Authentication token is invalid or missing",
            ("sk", "invalid_token") => "Autentifikačný token je neplatný alebo chýba",
            ("de", "invalid_token") => "Authentifizierungstoken ist ungültig oder fehlt",
            ("cs", "invalid_token") => "Autentizační token je neplatný nebo chybí",
            ("pl", "invalid_token") => "Token uwierzytelniania jest nieprawidłowy lub go brakuje",

            ("en", "user_not_found") => "User not found",
            ("sk", "user_not_found") => "Používateľ sa nenašiel",
            ("de", "user_not_found") => "Benutzer nicht gefunden",
            ("cs", "user_not_found") => "Uživatel nenalezen",
            ("pl", "user_not_found") => "Nie znaleziono użytkownika",

            ("en", "missing_tenant") => "The x-company-id header is required",
            ("sk", "missing_tenant") => "Hlavička x-company-id je povinná",
            ("de", "missing_tenant") => "Der Header x-company-id ist erforderlich",
            ("cs", "missing_tenant") => "Hlavička x-company-id je povinná",
            ("pl", "missing_tenant") => "Nagłówek x-company-id jest wymagany",

            ("en", "tenant_access_denied") => "You do not have access to this company",
            ("sk", "tenant_access_denied") => "Nemáte prístup k tejto firme",
            ("de", "tenant_access_denied") => "Sie haben keinen Zugriff auf diese Firma",
            ("cs", "tenant_access_denied") => "Nemáte přístup k této firmě",
            ("pl", "tenant_access_denied") => "Nie masz dostępu do tej firmy",

            ("en", "not_found") => "Record no longer exists",
            ("sk", "not_found") => "Záznam už neexistuje",
            ("de", "not_found") => "Datensatz existiert nicht mehr",
            ("cs", "not_found") => "Záznam již neexistuje",
            ("pl", "not_found") => "Rekord już nie istnieje",

            ("en", "internal") => "An unexpected error occurred",
            ("sk", "internal") => "Vyskytla sa neočakávaná chyba",
            ("de", "internal") => "Ein unerwarteter Fehler ist aufgetreten",
            ("cs", "internal") => "Došlo k neočekávané chybě",
            ("pl", "internal") => "Wystąpił nieoczekiwany błąd",

            // --- Rótulos de PDF ---
            ("en", "pdf.title") => "TRANSPORT ORDER",
            ("sk", "pdf.title") => "OBJEDNÁVKA PREPRAVY",
            ("de", "pdf.title") => "TRANSPORTAUFTRAG",
            ("cs", "pdf.title") => "OBJEDNÁVKA PŘEPRAVY",
            ("pl", "pdf.title") => "ZLECENIE TRANSPORTOWE",

            ("en", "pdf.date") => "Date",
            ("sk", "pdf.date") => "Dátum",
            ("de", "pdf.date") => "Datum",
            ("cs", "pdf.date") => "Datum",
            ("pl", "pdf.date") => "Data",

            ("en", "pdf.customer") => "Customer",
            ("sk", "pdf.customer") => "Zákazník",
            ("de", "pdf.customer") => "Kunde",
            ("cs", "pdf.customer") => "Zákazník",
            ("pl", "pdf.customer") => "Klient",

            ("en", "pdf.carrier") => "Carrier",
            ("sk", "pdf.carrier") => "Dopravca",
            ("de", "pdf.carrier") => "Frachtführer",
            ("cs", "pdf.carrier") => "Dopravce",
            ("pl", "pdf.carrier") => "Przewoźnik",

            ("en", "pdf.contact") => "Contact",
            ("sk", "pdf.contact") => "Kontakt",
            ("de", "pdf.contact") => "Kontakt",
            ("cs", "pdf.contact") => "Kontakt",
            ("pl", "pdf.contact") => "Kontakt",

            ("en", "pdf.phone") => "Phone",
            ("sk", "pdf.phone") => "Telefón",
            ("de", "pdf.phone") => "Telefon",
            ("cs", "pdf.phone") => "Telefon",
            ("pl", "pdf.phone") => "Telefon",

            ("en", "pdf.vat_id") => "VAT ID",
            ("sk", "pdf.vat_id") => "IČ DPH",
            ("de", "pdf.vat_id") => "USt-IdNr.",
            ("cs", "pdf.vat_id") => "DIČ",
            ("pl", "pdf.vat_id") => "NIP",

            ("en", "pdf.vehicle_reg") => "Vehicle registration",
            ("sk", "pdf.vehicle_reg") => "EČV vozidla",
            ("de", "pdf.vehicle_reg") => "Kfz-Kennzeichen",
            ("cs", "pdf.vehicle_reg") => "SPZ vozidla",
            ("pl", "pdf.vehicle_reg") => "Nr rejestracyjny pojazdu",

            ("en", "pdf.price") => "Agreed price",
            ("sk", "pdf.price") => "Dohodnutá cena",
            ("de", "pdf.price") => "Vereinbarter Preis",
            ("cs", "pdf.price") => "Dohodnutá cena",
            ("pl", "pdf.price") => "Uzgodniona cena",

            ("en", "pdf.loading") => "Loading",
            ("sk", "pdf.loading") => "Nakládka",
            ("de", "pdf.loading") => "Beladung",
            ("cs", "pdf.loading") => "Nakládka",
            ("pl", "pdf.loading") => "Załadunek",

            ("en", "pdf.unloading") => "Unloading",
            ("sk", "pdf.unloading") => "Vykládka",
            ("de", "pdf.unloading") => "Entladung",
            ("cs", "pdf.unloading") => "Vykládka",
            ("pl", "pdf.unloading") => "Rozładunek",

            ("en", "pdf.goods") => "Goods",
            ("sk", "pdf.goods") => "Tovar",
            ("de", "pdf.goods") => "Ware",
            ("cs", "pdf.goods") => "Zboží",
            ("pl", "pdf.goods") => "Towar",

            ("en", "pdf.created_by") => "Issued by",
            ("sk", "pdf.created_by") => "Vystavil",
            ("de", "pdf.created_by") => "Ausgestellt von",
            ("cs", "pdf.created_by") => "Vystavil",
            ("pl", "pdf.created_by") => "Wystawił",

            ("en", "pdf.file_prefix") => "order",
            ("sk", "pdf.file_prefix") => "objednavka",
            ("de", "pdf.file_prefix") => "auftrag",
            ("cs", "pdf.file_prefix") => "objednavka",
            ("pl", "pdf.file_prefix") => "zlecenie",

            _ => return None,
        };
        Some(msg)
    }
}

fn key_missing(_key: &str) -> &'static str {
    "…"
}
