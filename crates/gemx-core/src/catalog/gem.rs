//! Built-in catalog for GeM (Government e-Marketplace) contract PDFs.
//!
//! Contract PDFs print labels in English and Hindi, sometimes on the same
//! line and sometimes only one of them, so most rules carry both.

use super::definition::{CatalogDef, FieldDef, PartDef, PostProcess, RuleDef};

const ORGANISATION: [&str; 2] = ["Organisation Details", "संगठन विवरण"];
const BUYER: [&str; 2] = ["Buyer Details", "क्रेता विवरण"];

// Sections that can follow the buyer block, in any template revision.
const AFTER_BUYER: [&str; 10] = [
    "Financial Approval Detail",
    "वित्तीय अनुमोदन",
    "Paying Authority",
    "भुगतान प्राधिकारी",
    "Seller Details",
    "विक्रेता विवरण",
    "Consignee Detail",
    "परेषिती",
    "Product Details",
    "उत्पाद विवरण",
];

/// Definition of the built-in GeM contract catalog.
pub fn gem_contract_definition() -> CatalogDef {
    CatalogDef {
        name: "gem-contract".to_string(),
        fields: vec![
            FieldDef::new("File Name", RuleDef::FileName),
            FieldDef::new(
                "Contract No.",
                RuleDef::single([
                    r"Contract No\.?\s*[:\-]?\s*(GEMC-\d+)",
                    r"(?:संविदा|अनुबंध) संख्या\s*[:\-]?\s*(GEMC-\d+)",
                ]),
            ),
            FieldDef::new(
                "Generated Date",
                RuleDef::single([
                    r"Generated Date\s*:\s*(\d{1,2}-\w+-\d{4})",
                    r"तैयार करने की तारीख\s*:\s*(\d{1,2}-\w+-\d{4})",
                ]),
            ),
            FieldDef::new(
                "Organisation & Buyer Details",
                RuleDef::Composite {
                    parts: vec![
                        PartDef {
                            label: Some("Organisation Details".to_string()),
                            rule: RuleDef::block(ORGANISATION, BUYER),
                        },
                        PartDef {
                            label: Some("Buyer Details".to_string()),
                            rule: RuleDef::block(BUYER, AFTER_BUYER),
                        },
                    ],
                    separator: "\n\n".to_string(),
                },
            ),
            FieldDef::new(
                "Seller Company",
                RuleDef::single([r"Company Name\s*:\s*(.+)", r"कंपनी का नाम\s*:\s*(.+)"]),
            ),
            // Seller Phone and Seller Email take the first contact line in
            // the document, which on GeM contracts is usually the buyer's.
            FieldDef::new(
                "Seller Phone",
                RuleDef::single([r"(?:Contact No|संपर्क नंबर)\.?\s*:\s*([0-9\-]+)"]),
            ),
            FieldDef::new(
                "Seller Email",
                RuleDef::single([r"(?:Email ID|ईमेल आईडी)\s*:\s*([\w.\-@]+)"]),
            ),
            FieldDef::new(
                "Seller GSTIN",
                RuleDef::single([r"(?:GSTIN|जीएसटीआईएन)\s*:\s*([A-Z0-9]+)"]),
            ),
            FieldDef::new(
                "Seller Address",
                RuleDef::single([r"(?:Address|पता)\s*:\s*(.*\n.*,\s*\w+,\s*\w+-\d+)"])
                    .with_post(PostProcess::JoinLines {
                        with: ", ".to_string(),
                    }),
            ),
            FieldDef::new(
                "Product Name",
                RuleDef::single([r"(?:Product Name|उत्पाद का नाम)\s*:\s*(.+)"]),
            ),
            FieldDef::new("Brand", RuleDef::single([r"(?:Brand|ब्रांड)\s*:\s*(.+)"])),
            FieldDef::new(
                "Quantity",
                RuleDef::single([r"(\d[\d,]*)\s+pieces"]).with_post(PostProcess::StripThousands),
            ),
            FieldDef::new(
                "Unit Price",
                RuleDef::single([r"pieces\s+(\d[\d,]*(?:\.\d+)?)"])
                    .with_post(PostProcess::StripThousands),
            ),
            FieldDef::new(
                "Total Price",
                RuleDef::single([r"(?:Total Order Value|कुल ऑर्डर मूल्य).*?(\d[\d,]*(?:\.\d+)?)"])
                    .with_post(PostProcess::StripThousands),
            ),
            FieldDef::new("Wattage", RuleDef::single([r"Rating\s*-\s*(\d+)\s*Watt"])),
        ],
    }
}
