//! Structured listing data
//!
//! One [`ListingRecord`] per ad URL: the page title, the extracted
//! attribute set, and the resolved image URLs in discovery order. Every
//! attribute is independently optional and defaults to the empty string;
//! a missing value is a normal outcome, not an error.

/// Semantic attribute fields extracted from listing text
///
/// Names follow the marketplace's German labels; `Vorderachse` /
/// `Hinterachse` distinguish front-axle and rear-axle values of paired
/// attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Felgenhersteller,
    Reifenhersteller,
    Felgenfarbe,
    Zollgroesse,
    Lochkreis,
    Nabendurchmesser,
    EinpresstiefeVorderachse,
    EinpresstiefeHinterachse,
    ReifengroesseVorderachse,
    ReifengroesseHinterachse,
    ReifenbreiteVorderachse,
    ReifenbreiteHinterachse,
    Reifensaison,
    ProfiltiefeVorderachse,
    ProfiltiefeHinterachse,
    DotVorderachse,
    DotHinterachse,
}

impl Field {
    /// All fields in export column order
    pub const ALL: &'static [Field] = &[
        Field::Felgenhersteller,
        Field::Reifenhersteller,
        Field::Felgenfarbe,
        Field::Zollgroesse,
        Field::Lochkreis,
        Field::EinpresstiefeVorderachse,
        Field::EinpresstiefeHinterachse,
        Field::ReifengroesseVorderachse,
        Field::ReifengroesseHinterachse,
        Field::ReifenbreiteVorderachse,
        Field::ReifenbreiteHinterachse,
        Field::Nabendurchmesser,
        Field::Reifensaison,
        Field::ProfiltiefeVorderachse,
        Field::ProfiltiefeHinterachse,
        Field::DotVorderachse,
        Field::DotHinterachse,
    ];

    /// Column name used in the CSV export
    pub fn column_name(self) -> &'static str {
        match self {
            Field::Felgenhersteller => "felgenhersteller",
            Field::Reifenhersteller => "reifenhersteller",
            Field::Felgenfarbe => "felgenfarbe",
            Field::Zollgroesse => "zollgroesse",
            Field::Lochkreis => "lochkreis",
            Field::Nabendurchmesser => "nabendurchmesser",
            Field::EinpresstiefeVorderachse => "einpresstiefe_vorderachse",
            Field::EinpresstiefeHinterachse => "einpresstiefe_hinterachse",
            Field::ReifengroesseVorderachse => "reifengroesse_vorderachse",
            Field::ReifengroesseHinterachse => "reifengroesse_hinterachse",
            Field::ReifenbreiteVorderachse => "reifenbreite_vorderachse",
            Field::ReifenbreiteHinterachse => "reifenbreite_hinterachse",
            Field::Reifensaison => "reifensaison",
            Field::ProfiltiefeVorderachse => "profiltiefe_vorderachse",
            Field::ProfiltiefeHinterachse => "profiltiefe_hinterachse",
            Field::DotVorderachse => "dot_vorderachse",
            Field::DotHinterachse => "dot_hinterachse",
        }
    }
}

/// The extracted attribute values of one listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pub felgenhersteller: String,
    pub reifenhersteller: String,
    pub felgenfarbe: String,
    pub zollgroesse: String,
    pub lochkreis: String,
    pub nabendurchmesser: String,
    pub einpresstiefe_vorderachse: String,
    pub einpresstiefe_hinterachse: String,
    pub reifengroesse_vorderachse: String,
    pub reifengroesse_hinterachse: String,
    pub reifenbreite_vorderachse: String,
    pub reifenbreite_hinterachse: String,
    pub reifensaison: String,
    pub profiltiefe_vorderachse: String,
    pub profiltiefe_hinterachse: String,
    pub dot_vorderachse: String,
    pub dot_hinterachse: String,
}

impl Attributes {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Felgenhersteller => &self.felgenhersteller,
            Field::Reifenhersteller => &self.reifenhersteller,
            Field::Felgenfarbe => &self.felgenfarbe,
            Field::Zollgroesse => &self.zollgroesse,
            Field::Lochkreis => &self.lochkreis,
            Field::Nabendurchmesser => &self.nabendurchmesser,
            Field::EinpresstiefeVorderachse => &self.einpresstiefe_vorderachse,
            Field::EinpresstiefeHinterachse => &self.einpresstiefe_hinterachse,
            Field::ReifengroesseVorderachse => &self.reifengroesse_vorderachse,
            Field::ReifengroesseHinterachse => &self.reifengroesse_hinterachse,
            Field::ReifenbreiteVorderachse => &self.reifenbreite_vorderachse,
            Field::ReifenbreiteHinterachse => &self.reifenbreite_hinterachse,
            Field::Reifensaison => &self.reifensaison,
            Field::ProfiltiefeVorderachse => &self.profiltiefe_vorderachse,
            Field::ProfiltiefeHinterachse => &self.profiltiefe_hinterachse,
            Field::DotVorderachse => &self.dot_vorderachse,
            Field::DotHinterachse => &self.dot_hinterachse,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Felgenhersteller => &mut self.felgenhersteller,
            Field::Reifenhersteller => &mut self.reifenhersteller,
            Field::Felgenfarbe => &mut self.felgenfarbe,
            Field::Zollgroesse => &mut self.zollgroesse,
            Field::Lochkreis => &mut self.lochkreis,
            Field::Nabendurchmesser => &mut self.nabendurchmesser,
            Field::EinpresstiefeVorderachse => &mut self.einpresstiefe_vorderachse,
            Field::EinpresstiefeHinterachse => &mut self.einpresstiefe_hinterachse,
            Field::ReifengroesseVorderachse => &mut self.reifengroesse_vorderachse,
            Field::ReifengroesseHinterachse => &mut self.reifengroesse_hinterachse,
            Field::ReifenbreiteVorderachse => &mut self.reifenbreite_vorderachse,
            Field::ReifenbreiteHinterachse => &mut self.reifenbreite_hinterachse,
            Field::Reifensaison => &mut self.reifensaison,
            Field::ProfiltiefeVorderachse => &mut self.profiltiefe_vorderachse,
            Field::ProfiltiefeHinterachse => &mut self.profiltiefe_hinterachse,
            Field::DotVorderachse => &mut self.dot_vorderachse,
            Field::DotHinterachse => &mut self.dot_hinterachse,
        };
        *slot = value;
    }
}

/// One structured result per ad, immutable once assembled
#[derive(Debug, Clone)]
pub struct ListingRecord {
    /// The ad URL, unique key of the record
    pub url: String,

    /// Page title
    pub title: String,

    /// Extracted attribute values
    pub attributes: Attributes,

    /// Resolved image URLs, insertion order = discovery order
    pub image_urls: Vec<String>,
}
