//! Static DIY resource guides shown to signed-in members.

/// Illustration attached to a guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideImage {
    pub src: &'static str,
    pub caption: &'static str,
}

/// Read-only resource guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceGuide {
    /// Stable slug used to track expansion state.
    pub id: &'static str,
    pub title: &'static str,
    pub body: &'static str,
    pub images: &'static [GuideImage],
}

/// The guide catalog, in display order.
#[must_use]
pub const fn catalog() -> &'static [ResourceGuide] {
    CATALOG
}

/// Look up a guide by slug.
#[must_use]
pub fn find(id: &str) -> Option<&'static ResourceGuide> {
    CATALOG.iter().find(|guide| guide.id == id)
}

const CATALOG: &[ResourceGuide] = &[
    ResourceGuide {
        id: "visual-inspection",
        title: "DIY Visual Inspection Checklist (HVAC & Refrigeration)",
        body: "\
1. Overall Condition: Check for widespread rust, physical damage (dents, bent fins), and missing panels. For rooftop units, examine any exposed ductwork for breaks or open seams. Also, inspect the electrical disconnect conduit and box to ensure they are intact and in good condition.
2. Coil Condition: Examine the condenser and evaporator coils. Are they damaged, heavily worn, or caked with dirt and debris? Clean coils are crucial for efficiency.
3. Refrigerant Lines & Oil Leaks: For split systems, inspect refrigerant lines for damaged or missing insulation. Look closely around the compressor, evaporator, and condenser for any signs of oil residue, which indicates a potential refrigerant leak.
4. Drain Lines: Ensure condensate drain lines are properly connected and not clogged. Look for signs of water leakage around the unit, which could point to broken or disconnected drain lines.
5. Listen for Trouble: Turn the unit on. Listen for unusual noises like grinding, squealing, or excessive rattling, which can indicate mechanical problems.
6. Check Filters: Dirty or clogged air filters are a common cause of poor performance and can strain the system.",
        images: &[
            GuideImage {
                src: "https://placehold.co/400x300/f87171/ffffff?text=Severe+Rust+on+Unit",
                caption: "Significant rust on panels is a red flag.",
            },
            GuideImage {
                src: "https://placehold.co/400x300/fbbf24/ffffff?text=Damaged+Coil+Fins",
                caption: "Bent coil fins restrict airflow and reduce efficiency.",
            },
            GuideImage {
                src: "https://placehold.co/400x300/a3a3a3/ffffff?text=Broken+Rooftop+Ductwork",
                caption: "Broken or unsealed ductwork leads to massive energy loss.",
            },
        ],
    },
    ResourceGuide {
        id: "unit-age",
        title: "How to Determine a Unit's Age",
        body: "\
Every HVAC/R unit has a data plate or sticker with manufacturing information, including the serial number. The age is often encoded within this number.
- Common Formats: Look for a 4-digit code within the serial number. Often, the first two digits represent the week of the year, and the last two represent the year (e.g., '1408' could mean the 14th week of 2008).
- Brand Specifics: The format varies by manufacturer. A quick internet search for \"[Brand Name] serial number age lookup\" can help you decode it.",
        images: &[
            GuideImage {
                src: "https://placehold.co/400x300/d1d5db/000000?text=Data+Plate+Example",
                caption: "Locate the data plate on the exterior of the unit.",
            },
            GuideImage {
                src: "https://placehold.co/400x300/e5e7eb/000000?text=Close-Up+of+Serial+Number",
                caption: "The serial number is key to finding the manufacture date.",
            },
            GuideImage {
                src: "https://placehold.co/400x300/9ca3af/ffffff?text=Decoding+Serial+Number",
                caption: "Online guides can help you decode the specific format.",
            },
        ],
    },
    ResourceGuide {
        id: "refrigerant-leaks",
        title: "Identifying Signs of Refrigerant Leaks",
        body: "\
Refrigerant is the lifeblood of an AC or refrigeration system. Leaks are a serious and common problem.
- Oily Residue: This is the most reliable sign. Look for greasy or oily stains on coils, fittings, and especially around the compressor area.
- Ice Buildup: Frost or ice forming on the refrigerant lines or evaporator coil is a classic sign of low refrigerant, often caused by a leak.
- Hissing Sounds: A subtle hissing or bubbling sound near the unit can indicate escaping refrigerant gas.
- Poor Performance: If the system is running constantly but not cooling effectively, a leak is a likely culprit.",
        images: &[
            GuideImage {
                src: "https://placehold.co/400x300/a3e635/000000?text=Oil+Stain+on+Compressor",
                caption: "Dark, oily residue around compressor fittings.",
            },
            GuideImage {
                src: "https://placehold.co/400x300/bfdbfe/000000?text=Iced-Over+Refrigerant+Line",
                caption: "Ice forming on lines is a tell-tale sign of low refrigerant.",
            },
            GuideImage {
                src: "https://placehold.co/400x300/a3e635/000000?text=Oily+Residue+on+Coil",
                caption: "Stains on the coil itself indicate a leak within the coil.",
            },
        ],
    },
];
