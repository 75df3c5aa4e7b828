//! Built-in plant-care catalog.
//!
//! A fixed table of common vegetables, herbs and chili peppers with their
//! growing parameters. Lookups are case-insensitive and fall back to a
//! substring match in both directions, taking the first entry in table
//! order. The fallback is lossy ("tomate coração de boi" resolves to
//! `tomate`, "cherry" to `tomate cherry`); table order therefore matters
//! and must not be re-sorted.

use tracing::debug;

use crate::models::PlantCareProfile;

/// One row of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Lowercase lookup key.
    pub key: &'static str,
    pub cycle_days: u32,
    pub target_humidity_pct: u8,
    pub temperature_range: &'static str,
    pub light_requirement: &'static str,
    pub description: &'static str,
}

impl CatalogEntry {
    pub fn to_profile(&self) -> PlantCareProfile {
        PlantCareProfile {
            cycle_days: self.cycle_days,
            target_humidity_pct: self.target_humidity_pct,
            ideal_temperature_range: self.temperature_range.to_string(),
            light_requirement: self.light_requirement.to_string(),
            description: self.description.to_string(),
        }
    }
}

const fn entry(
    key: &'static str,
    cycle_days: u32,
    target_humidity_pct: u8,
    temperature_range: &'static str,
    light_requirement: &'static str,
    description: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        key,
        cycle_days,
        target_humidity_pct,
        temperature_range,
        light_requirement,
        description,
    }
}

static BUILTIN: &[CatalogEntry] = &[
    entry(
        "manjericão",
        60,
        65,
        "20-25°C",
        "Sol direto, 6-8h",
        "O manjericão é uma erva aromática que prefere sol direto e solo húmido mas bem drenado. Evitar regar as folhas para prevenir doenças fúngicas. Podar regularmente para estimular crescimento compacto.",
    ),
    entry(
        "tomate",
        90,
        70,
        "20-28°C",
        "Sol direto, 8h+",
        "Tomates precisam de muito sol e rega regular e profunda. Suporte (tutores) necessário quando crescer. Remover rebentos laterais para maior produção. Regar na base, não nas folhas.",
    ),
    entry(
        "tomate cherry",
        80,
        68,
        "18-26°C",
        "Sol direto, 6-8h",
        "Variedade mais compacta e produtiva. Ideal para vasos e estufas. Produz frutos em cachos. Muito saborosos quando colhidos maduros na planta.",
    ),
    entry(
        "alface",
        45,
        60,
        "15-20°C",
        "Sol parcial, 4-6h",
        "Alface cresce rapidamente em climas amenos. Colher folhas externas primeiro para prolongar colheita. Evitar sol intenso que causa bolting (floração prematura).",
    ),
    entry(
        "rúcula",
        35,
        55,
        "15-22°C",
        "Sol parcial, 4-5h",
        "Planta de crescimento muito rápido, tolera alguma sombra. Sabor mais picante com calor. Semear em sucessão para colheita contínua.",
    ),
    entry(
        "espinafre",
        40,
        60,
        "10-20°C",
        "Sol parcial, 4-6h",
        "Prefere temperaturas amenas, bolt com calor. Muito nutritivo. Colher folhas externas ou cortar toda a planta a 3cm do solo para rebrote.",
    ),
    entry(
        "salsa",
        75,
        60,
        "15-22°C",
        "Sol parcial a pleno, 4-6h",
        "Germinação lenta (2-3 semanas). Planta bienal, produz folhas no primeiro ano. Colher folhas externas regularmente. Tolera algum frio.",
    ),
    entry(
        "coentros",
        50,
        55,
        "15-25°C",
        "Sol parcial, 4-5h",
        "Ciclo rápido, tende a florescer com calor. Semear a cada 2-3 semanas para colheita contínua. As sementes (coentro seco) também são utilizáveis.",
    ),
    entry(
        "hortelã",
        80,
        70,
        "18-24°C",
        "Sol parcial, 4-6h",
        "Muito invasiva, manter em vaso separado ou com barreiras. Gosta de humidade constante. Podar regularmente para manter compacta e aromática.",
    ),
    entry(
        "cebolinho",
        60,
        55,
        "15-25°C",
        "Sol pleno a parcial, 4-6h",
        "Perene, volta a crescer após corte. Cortar a 5cm do solo. Flores são comestíveis. Muito resistente e fácil de cultivar.",
    ),
    entry(
        "morango",
        120,
        65,
        "15-25°C",
        "Sol direto, 6-8h",
        "Planta perene que produz por vários anos. Produz estolões que podem ser replantados. Mulching ajuda a manter frutos limpos e humidade.",
    ),
    entry(
        "pimento",
        100,
        65,
        "20-28°C",
        "Sol direto, 6-8h",
        "Precisa de calor para produzir bem. Suporte pode ser necessário com frutos pesados. Colher quando atingir cor desejada.",
    ),
    entry(
        "aji limo",
        95,
        65,
        "22-30°C",
        "Sol direto, 6-8h",
        "Pimenta peruana muito aromática e picante. Gosta de calor intenso. Colher quando amarelo-alaranjado. Usado em ceviches e molhos. Rica em vitamina C.",
    ),
    entry(
        "pepino",
        55,
        75,
        "22-28°C",
        "Sol direto, 6-8h",
        "Precisa de muita água e calor. Trepadeira, beneficia de suporte vertical. Colher jovens para melhor sabor e mais produção.",
    ),
    entry(
        "couve",
        65,
        60,
        "15-22°C",
        "Sol pleno a parcial, 4-6h",
        "Tolera frio, sabor melhora após geada leve. Variedades incluem couve-galega, couve-de-bruxelas, etc. Vigilar pragas.",
    ),
    entry(
        "agrião",
        30,
        80,
        "12-20°C",
        "Sol parcial, 3-5h",
        "Adora humidade, pode crescer em água. Crescimento muito rápido. Colher antes da floração para melhor sabor. Rico em vitaminas.",
    ),
    entry(
        "orégãos",
        85,
        45,
        "18-28°C",
        "Sol pleno, 6-8h",
        "Planta mediterrânica, prefere solo seco e bem drenado. Perene e resistente. Secar folhas para usar durante o inverno.",
    ),
    entry(
        "habanero",
        120,
        60,
        "24-32°C",
        "Sol pleno, 8h+",
        "Pimento muito picante (100k-350k Scoville). Necessita calor intenso e sol pleno. Germinar a 28-30°C. Regar moderadamente, evitar encharcamento.",
    ),
    entry(
        "jalapeño",
        90,
        65,
        "22-28°C",
        "Sol pleno, 6-8h",
        "Pimento picante médio (2.5k-8k Scoville). Muito produtivo. Colher verde ou vermelho maduro. Ideal para iniciantes.",
    ),
    entry(
        "jalapeno",
        90,
        65,
        "22-28°C",
        "Sol pleno, 6-8h",
        "Pimento picante médio (2.5k-8k Scoville). Muito produtivo. Colher verde ou vermelho maduro. Ideal para iniciantes.",
    ),
    entry(
        "carolina reaper",
        130,
        60,
        "24-32°C",
        "Sol pleno, 8h+",
        "O pimento mais picante do mundo! (1.5M-2.2M Scoville). Requer muito calor e paciência. Usar luvas ao manusear.",
    ),
    entry(
        "cayenne",
        85,
        60,
        "21-29°C",
        "Sol pleno, 6-8h",
        "Pimento picante versátil (30k-50k Scoville). Fácil de secar. Muito usado em pó. Produtivo em climas quentes.",
    ),
    entry(
        "piri-piri",
        95,
        60,
        "22-30°C",
        "Sol pleno, 6-8h",
        "Pimento africano picante (50k-175k Scoville). Resistente ao calor. Popular em Portugal. Plantas compactas.",
    ),
    entry(
        "piri piri",
        95,
        60,
        "22-30°C",
        "Sol pleno, 6-8h",
        "Pimento africano picante (50k-175k Scoville). Resistente ao calor. Popular em Portugal. Plantas compactas.",
    ),
    entry(
        "malagueta",
        90,
        60,
        "22-30°C",
        "Sol pleno, 6-8h",
        "Pimento brasileiro picante (60k-100k Scoville). Plantas produtivas. Frutos pequenos e alongados.",
    ),
    entry(
        "ghost pepper",
        125,
        60,
        "24-32°C",
        "Sol pleno, 8h+",
        "Bhut Jolokia, extremamente picante (1M Scoville). Originário da Índia. Requer calor intenso para amadurecer.",
    ),
    entry(
        "bhut jolokia",
        125,
        60,
        "24-32°C",
        "Sol pleno, 8h+",
        "Ghost Pepper, extremamente picante (1M Scoville). Originário da Índia. Requer calor intenso.",
    ),
    entry(
        "scotch bonnet",
        110,
        65,
        "24-30°C",
        "Sol pleno, 6-8h",
        "Pimento caribenho (100k-350k Scoville). Sabor frutado distintivo. Essencial na culinária jamaicana.",
    ),
    entry(
        "tabasco",
        100,
        65,
        "22-30°C",
        "Sol pleno, 6-8h",
        "Famoso pelo molho. Pimentos pequenos e muito picantes (30k-50k Scoville). Muito produtivo.",
    ),
    entry(
        "serrano",
        85,
        65,
        "21-29°C",
        "Sol pleno, 6-8h",
        "Pimento mexicano (10k-25k Scoville). Mais picante que jalapeño. Ideal fresco em salsas.",
    ),
    entry(
        "poblano",
        95,
        65,
        "21-28°C",
        "Sol pleno, 6-8h",
        "Pimento suave mexicano (1k-2k Scoville). Seco chama-se ancho. Ideal para chiles rellenos.",
    ),
    entry(
        "thai chili",
        90,
        60,
        "24-30°C",
        "Sol pleno, 6-8h",
        "Pimento asiático pequeno mas muito picante (50k-100k Scoville). Plantas muito produtivas.",
    ),
    entry(
        "cenoura",
        75,
        65,
        "15-20°C",
        "Sol pleno a parcial, 6h",
        "Solo solto e profundo sem pedras. Desbastar para cenouras maiores. Manter solo húmido.",
    ),
    entry(
        "beterraba",
        60,
        70,
        "15-22°C",
        "Sol pleno a parcial, 4-6h",
        "Raiz e folhas comestíveis. Solo solto. Colher quando 5-7cm de diâmetro.",
    ),
    entry(
        "rabanete",
        30,
        70,
        "12-20°C",
        "Sol parcial, 4-6h",
        "O mais rápido da horta! Pronto em 4 semanas. Semear em sucessão. Evitar calor.",
    ),
];

/// Static lookup table of plant-care parameters.
#[derive(Debug, Clone, Copy)]
pub struct PlantCatalog {
    entries: &'static [CatalogEntry],
}

impl Default for PlantCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PlantCatalog {
    /// The catalog shipped with the application.
    pub fn builtin() -> Self {
        Self { entries: BUILTIN }
    }

    pub fn entries(&self) -> &'static [CatalogEntry] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the catalog row for a plant name.
    ///
    /// Exact key match first, then the first row whose key contains the
    /// name or is contained in it. Blank names never match.
    pub fn find(&self, name: &str) -> Option<&'static CatalogEntry> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        if let Some(hit) = self.entries.iter().find(|e| e.key == needle) {
            return Some(hit);
        }

        let hit = self
            .entries
            .iter()
            .find(|e| needle.contains(e.key) || e.key.contains(needle.as_str()));
        if let Some(e) = hit {
            debug!(
                subsystem = "core",
                component = "catalog",
                op = "lookup",
                plant_name = %needle,
                matched = e.key,
                "Partial catalog match"
            );
        }
        hit
    }

    /// Resolve a plant name to its care profile.
    pub fn lookup(&self, name: &str) -> Option<PlantCareProfile> {
        self.find(name).map(CatalogEntry::to_profile)
    }
}
