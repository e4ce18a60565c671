use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: String, // free text: "m²", "h", "ensemble"
}

/// One priced row of the quote (a "prestation").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: Quantity,
    pub unit_price: f64,
    pub tax_rate_percent: f64,
}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        unit_price: f64,
        tax_rate_percent: f64,
    ) -> Self {
        Self {
            description: description.into(),
            quantity: Quantity {
                value: quantity,
                unit: unit.into(),
            },
            unit_price,
            tax_rate_percent,
        }
    }

    pub fn total_excluding_tax(&self) -> f64 {
        self.unit_price * self.quantity.value
    }

    pub fn tax(&self) -> f64 {
        self.total_excluding_tax() * self.tax_rate_percent / 100.0
    }

    pub fn total_including_tax(&self) -> f64 {
        self.total_excluding_tax() * (1.0 + self.tax_rate_percent / 100.0)
    }
}

impl Default for LineItem {
    /// Blank row as added by the editor: empty text, zero quantity, 20 % VAT.
    fn default() -> Self {
        LineItem::new("", 0.0, "", 0.0, 20.0)
    }
}

/// Display-only currency code. No conversion is ever performed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(pub String);

impl Currency {
    pub fn eur() -> Self {
        Currency("EUR".into())
    }

    /// Literal marker printed after every amount.
    pub fn symbol(&self) -> &str {
        match self.0.as_str() {
            "EUR" => "€",
            "USD" => "$",
            "GBP" => "£",
            other => other,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::eur()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LegalInfo {
    pub siret: String,
    pub ape_code: String,
    pub rcs: String,
    pub legal_form: String,
    pub share_capital: String,
    pub vat_number: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Issuer {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub legal: LegalInfo,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Terms {
    pub payment_terms: String,
    pub execution_delay: String,
    pub execution_location: String,
    pub professional_insurance: String,
    pub decennial_insurance: String,
    pub decennial_policy_number: String,
    pub coverage_area: String,
    pub general_terms: String,
    pub validity_days: u32,
    pub late_payment_penalty: String,
}

impl Default for Terms {
    fn default() -> Self {
        Self {
            payment_terms: String::new(),
            execution_delay: String::new(),
            execution_location: String::new(),
            professional_insurance: String::new(),
            decennial_insurance: String::new(),
            decennial_policy_number: String::new(),
            coverage_area: String::new(),
            general_terms: String::new(),
            validity_days: 30,
            late_payment_penalty: String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub currency: Currency,
    pub issuer: Issuer,
    pub client: Client,
    #[serde(default)]
    pub terms: Terms,
    /// Print order.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

impl Quote {
    /// Append a blank line and return its index.
    pub fn add_line_item(&mut self) -> usize {
        self.line_items.push(LineItem::default());
        self.line_items.len() - 1
    }

    /// Remove the line at `index`, keeping the order of the others.
    pub fn remove_line_item(&mut self, index: usize) -> Option<LineItem> {
        (index < self.line_items.len()).then(|| self.line_items.remove(index))
    }

    pub fn line_item_mut(&mut self, index: usize) -> Option<&mut LineItem> {
        self.line_items.get_mut(index)
    }

    /// Demonstration quote used by `--sample` and the tests.
    pub fn sample(date: NaiveDate) -> Self {
        Self {
            id: "D-MAN-250622-002".into(),
            date,
            currency: Currency::eur(),
            issuer: Issuer {
                name: "Entreprise ABC".into(),
                address: "12 rue des Lilas, 75000 Paris".into(),
                phone: "06 00 00 00 00".into(),
                email: "contact@abc.fr".into(),
                legal: LegalInfo {
                    siret: "12345678901234".into(),
                    ape_code: "4334Z".into(),
                    rcs: "RCS Paris 123 456 789".into(),
                    legal_form: "SARL".into(),
                    share_capital: "10 000".into(),
                    vat_number: "FR12345678901".into(),
                },
            },
            client: Client {
                name: "Jean Dupont".into(),
                address: "23 Rue Richelieu, Paris".into(),
            },
            terms: Terms {
                payment_terms: "30% à la commande, 70% à la livraison".into(),
                execution_delay: "15 jours ouvrés".into(),
                execution_location: "Domicile du client".into(),
                professional_insurance: "Allianz - Police n°ABC123456 - Territoire français"
                    .into(),
                decennial_insurance: "Groupama".into(),
                decennial_policy_number: "DEF789012".into(),
                coverage_area: "Île-de-France".into(),
                general_terms: "Nos conditions générales de vente sont disponibles sur demande"
                    .into(),
                validity_days: 30,
                late_payment_penalty:
                    "En cas de retard de paiement, une pénalité de 10 % du montant TTC".into(),
            },
            line_items: vec![
                LineItem::new("Réparation mur en pierre", 30.0, "m2", 45.0, 20.0),
                LineItem::new("Réparation plafond", 12.0, "m", 15.0, 20.0),
            ],
        }
    }
}

/// Flat, currency-denominated discount on the pre-tax subtotal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountState {
    pub amount: f64,
    pub applied: bool,
}

impl DiscountState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn applied(amount: f64) -> Self {
        Self {
            amount,
            applied: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// RGB colour, one byte per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    pub(crate) fn unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}
