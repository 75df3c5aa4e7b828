//! Domain models for GardenGes.
//!
//! JSON field names are English snake_case. Plant request bodies also accept
//! the Portuguese keys the web frontend sends (`nome`, `andar`,
//! `data_inicio`, ...) through serde aliases.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::defaults;
use crate::error::{Error, Result};

// =============================================================================
// CARE PROFILES
// =============================================================================

/// Growing parameters for one plant species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlantCareProfile {
    /// Growing cycle length in days.
    pub cycle_days: u32,
    /// Ideal soil humidity, percent.
    pub target_humidity_pct: u8,
    /// Human-readable temperature range, e.g. "20-25°C".
    pub ideal_temperature_range: String,
    /// Human-readable light requirement.
    pub light_requirement: String,
    pub description: String,
}

impl PlantCareProfile {
    /// Generic profile used when neither the catalog nor the AI know the plant.
    pub fn generic(plant_name: &str) -> Self {
        Self {
            cycle_days: defaults::DEFAULT_CYCLE_DAYS,
            target_humidity_pct: defaults::DEFAULT_TARGET_HUMIDITY_PCT,
            ideal_temperature_range: defaults::DEFAULT_TEMPERATURE_RANGE.to_string(),
            light_requirement: defaults::DEFAULT_LIGHT_REQUIREMENT.to_string(),
            description: format!(
                "Dados genéricos para {}. Recomendamos pesquisar requisitos específicos desta planta.",
                plant_name
            ),
        }
    }
}

/// Which stage of the care-data fallback chain produced a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CareSourceKind {
    /// Built-in plant catalog.
    Database,
    /// AI chat-completion lookup.
    Ai,
    /// Generic fallback profile.
    Default,
}

impl CareSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CareSourceKind::Database => "database",
            CareSourceKind::Ai => "ai",
            CareSourceKind::Default => "default",
        }
    }
}

impl fmt::Display for CareSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detailed care guide for one plant.
///
/// Every field defaults to empty so a partially filled AI answer still
/// parses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PlantCareGuide {
    #[serde(alias = "nome_cientifico")]
    pub scientific_name: String,
    #[serde(alias = "familia")]
    pub family: String,
    #[serde(alias = "origem")]
    pub origin: String,
    #[serde(alias = "descricao")]
    pub description: String,
    #[serde(alias = "beneficios")]
    pub benefits: Vec<String>,
    #[serde(alias = "cuidados")]
    pub care: CareInstructions,
    #[serde(alias = "pragas_doencas")]
    pub pests_and_diseases: Vec<PestEntry>,
    #[serde(alias = "colheita")]
    pub harvest: HarvestInfo,
    #[serde(alias = "dicas_extras")]
    pub extra_tips: Vec<String>,
    #[serde(alias = "curiosidades")]
    pub trivia: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CareInstructions {
    #[serde(alias = "rega")]
    pub watering: WateringCare,
    #[serde(alias = "luz")]
    pub light: LightCare,
    #[serde(alias = "solo")]
    pub soil: SoilCare,
    #[serde(alias = "temperatura")]
    pub temperature: TemperatureCare,
    #[serde(alias = "humidade")]
    pub humidity: HumidityCare,
    #[serde(alias = "fertilizacao")]
    pub fertilization: FertilizationCare,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct WateringCare {
    #[serde(alias = "frequencia")]
    pub frequency: String,
    #[serde(alias = "quantidade")]
    pub amount: String,
    #[serde(alias = "dicas")]
    pub tips: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LightCare {
    #[serde(alias = "tipo")]
    pub kind: String,
    #[serde(alias = "horas")]
    pub hours: String,
    #[serde(alias = "dicas")]
    pub tips: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SoilCare {
    #[serde(alias = "tipo")]
    pub kind: String,
    pub ph: String,
    #[serde(alias = "drenagem")]
    pub drainage: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct TemperatureCare {
    pub ideal: String,
    #[serde(alias = "minima")]
    pub minimum: String,
    #[serde(alias = "maxima")]
    pub maximum: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct HumidityCare {
    pub ideal: String,
    #[serde(alias = "dicas")]
    pub tips: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct FertilizationCare {
    #[serde(alias = "frequencia")]
    pub frequency: String,
    #[serde(alias = "tipo")]
    pub kind: String,
    #[serde(alias = "epoca")]
    pub season: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PestEntry {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "prevencao")]
    pub prevention: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct HarvestInfo {
    #[serde(alias = "tempo")]
    pub time: String,
    #[serde(alias = "sinais")]
    pub signs: String,
    #[serde(alias = "metodo")]
    pub method: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl PlantCareGuide {
    /// Generic guide used when the AI is unavailable or returns garbage.
    pub fn generic(plant_name: &str) -> Self {
        let unavailable = "Não disponível".to_string();
        Self {
            scientific_name: unavailable.clone(),
            family: unavailable.clone(),
            origin: unavailable,
            description: format!(
                "Informações sobre {}. Para dados mais detalhados, verifique se a chave GROQ_API_KEY está configurada.",
                plant_name
            ),
            benefits: strings(&[
                "Rico em nutrientes",
                "Fácil de cultivar",
                "Versátil na cozinha",
            ]),
            care: CareInstructions {
                watering: WateringCare {
                    frequency: "2-3 vezes por semana".to_string(),
                    amount: "Moderada".to_string(),
                    tips: "Verificar humidade do solo antes de regar".to_string(),
                },
                light: LightCare {
                    kind: defaults::DEFAULT_LIGHT_REQUIREMENT.to_string(),
                    hours: "4-6 horas".to_string(),
                    tips: "Evitar sol forte nas horas mais quentes".to_string(),
                },
                soil: SoilCare {
                    kind: "Rico em matéria orgânica".to_string(),
                    ph: "6.0-7.0".to_string(),
                    drainage: "Boa drenagem é essencial".to_string(),
                },
                temperature: TemperatureCare {
                    ideal: defaults::DEFAULT_TEMPERATURE_RANGE.to_string(),
                    minimum: "10°C".to_string(),
                    maximum: "30°C".to_string(),
                },
                humidity: HumidityCare {
                    ideal: "60-70%".to_string(),
                    tips: "Pulverizar folhas em dias secos".to_string(),
                },
                fertilization: FertilizationCare {
                    frequency: "A cada 2-3 semanas".to_string(),
                    kind: "Fertilizante equilibrado".to_string(),
                    season: "Primavera e verão".to_string(),
                },
            },
            pests_and_diseases: vec![
                PestEntry {
                    name: "Pulgões".to_string(),
                    prevention: "Inspecionar regularmente".to_string(),
                },
                PestEntry {
                    name: "Oídio".to_string(),
                    prevention: "Boa circulação de ar".to_string(),
                },
            ],
            harvest: HarvestInfo {
                time: "Varia conforme a planta".to_string(),
                signs: "Verificar maturidade visual".to_string(),
                method: "Colher com cuidado para não danificar a planta".to_string(),
            },
            extra_tips: strings(&[
                "Rotacionar posição para crescimento uniforme",
                "Remover folhas amareladas",
                "Manter espaçamento adequado",
            ]),
            trivia: strings(&[
                "Cada planta tem necessidades únicas",
                "A observação regular é a chave do sucesso",
            ]),
        }
    }
}

// =============================================================================
// PLANT RECORDS
// =============================================================================

/// A plant placed in a slot of the garden.
///
/// `(floor, slot_index)` is unique across all records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlantRecord {
    pub id: String,
    pub name: String,
    pub floor: i32,
    pub slot_index: i32,
    pub start_date: NaiveDate,
    /// Manual shift applied to the cycle, in days.
    pub cycle_adjustment_days: i32,
    pub cycle_days: i32,
    pub target_humidity_pct: i32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validated fields for a new plant record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlant {
    pub name: String,
    pub floor: i32,
    pub slot_index: i32,
    pub start_date: NaiveDate,
    pub cycle_adjustment_days: i32,
    pub cycle_days: i32,
    pub target_humidity_pct: i32,
}

/// Body of a create-plant request.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreatePlantRequest {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
    #[serde(default, alias = "andar")]
    pub floor: Option<i32>,
    #[serde(default)]
    pub slot_index: Option<i32>,
    #[serde(default, alias = "data_inicio")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, alias = "ajuste_dias")]
    pub cycle_adjustment_days: Option<i32>,
    #[serde(default, alias = "ciclo_total")]
    pub cycle_days: Option<i32>,
    #[serde(default, alias = "targets_humidade")]
    pub target_humidity_pct: Option<i32>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| Error::InvalidInput(format!("missing required field: {}", field)))
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput("name must not be empty".to_string()));
    }
    Ok(())
}

fn validate_floor(floor: i32) -> Result<()> {
    if floor < 1 {
        return Err(Error::InvalidInput(format!(
            "floor must be at least 1, got {}",
            floor
        )));
    }
    Ok(())
}

fn validate_slot(slot_index: i32) -> Result<()> {
    if slot_index < 0 {
        return Err(Error::InvalidInput(format!(
            "slot_index must not be negative, got {}",
            slot_index
        )));
    }
    Ok(())
}

fn validate_cycle(cycle_days: i32) -> Result<()> {
    if cycle_days <= 0 {
        return Err(Error::InvalidInput(format!(
            "cycle_days must be positive, got {}",
            cycle_days
        )));
    }
    Ok(())
}

fn validate_humidity(pct: i32) -> Result<()> {
    if !(0..=100).contains(&pct) {
        return Err(Error::InvalidInput(format!(
            "target_humidity_pct must be within 0-100, got {}",
            pct
        )));
    }
    Ok(())
}

impl CreatePlantRequest {
    /// Check required fields and value ranges.
    pub fn validate(self) -> Result<NewPlant> {
        let name = required(self.name, "name")?;
        let floor = required(self.floor, "floor")?;
        let slot_index = required(self.slot_index, "slot_index")?;
        let start_date = required(self.start_date, "start_date")?;
        let cycle_days = required(self.cycle_days, "cycle_days")?;
        let target_humidity_pct = required(self.target_humidity_pct, "target_humidity_pct")?;

        validate_name(&name)?;
        validate_floor(floor)?;
        validate_slot(slot_index)?;
        validate_cycle(cycle_days)?;
        validate_humidity(target_humidity_pct)?;

        Ok(NewPlant {
            name: name.trim().to_string(),
            floor,
            slot_index,
            start_date,
            cycle_adjustment_days: self.cycle_adjustment_days.unwrap_or(0),
            cycle_days,
            target_humidity_pct,
        })
    }
}

/// Body of an update-plant request. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UpdatePlantRequest {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
    #[serde(default, alias = "andar")]
    pub floor: Option<i32>,
    #[serde(default)]
    pub slot_index: Option<i32>,
    #[serde(default, alias = "data_inicio")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, alias = "ajuste_dias")]
    pub cycle_adjustment_days: Option<i32>,
    #[serde(default, alias = "ciclo_total")]
    pub cycle_days: Option<i32>,
    #[serde(default, alias = "targets_humidade")]
    pub target_humidity_pct: Option<i32>,
}

impl UpdatePlantRequest {
    /// Check the ranges of the fields that are present.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(floor) = self.floor {
            validate_floor(floor)?;
        }
        if let Some(slot) = self.slot_index {
            validate_slot(slot)?;
        }
        if let Some(cycle) = self.cycle_days {
            validate_cycle(cycle)?;
        }
        if let Some(pct) = self.target_humidity_pct {
            validate_humidity(pct)?;
        }
        Ok(())
    }

    /// Merge the present fields into `plant`. The id never changes.
    pub fn apply_to(&self, plant: &mut PlantRecord) {
        if let Some(name) = &self.name {
            plant.name = name.trim().to_string();
        }
        if let Some(floor) = self.floor {
            plant.floor = floor;
        }
        if let Some(slot) = self.slot_index {
            plant.slot_index = slot;
        }
        if let Some(date) = self.start_date {
            plant.start_date = date;
        }
        if let Some(adj) = self.cycle_adjustment_days {
            plant.cycle_adjustment_days = adj;
        }
        if let Some(cycle) = self.cycle_days {
            plant.cycle_days = cycle;
        }
        if let Some(pct) = self.target_humidity_pct {
            plant.target_humidity_pct = pct;
        }
    }

    /// True when the update would move the plant to another slot.
    pub fn moves_slot(&self, plant: &PlantRecord) -> bool {
        self.floor.is_some_and(|f| f != plant.floor)
            || self.slot_index.is_some_and(|s| s != plant.slot_index)
    }
}

// =============================================================================
// SENSORS
// =============================================================================

/// One floor's sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SensorReading {
    pub floor: i32,
    pub humidity_pct: f64,
    pub temperature_c: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_lux: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}

/// Where a sensor snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SensorSource {
    Ewelink,
    Mock,
}

impl SensorSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorSource::Ewelink => "ewelink",
            SensorSource::Mock => "mock",
        }
    }
}

/// Readings for every floor that reported, keyed by floor number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SensorSnapshot {
    pub readings: BTreeMap<i32, SensorReading>,
    pub source: SensorSource,
    pub taken_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SensorSnapshot {
    pub fn new(source: SensorSource) -> Self {
        Self {
            readings: BTreeMap::new(),
            source,
            taken_at: Utc::now(),
            note: None,
        }
    }

    /// Humidity per floor, the input of the watering planner.
    pub fn humidity_by_floor(&self) -> BTreeMap<i32, f64> {
        self.readings
            .iter()
            .map(|(floor, r)| (*floor, r.humidity_pct))
            .collect()
    }
}

// =============================================================================
// WATERING
// =============================================================================

/// Watering tier for one plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WateringStatus {
    Ok,
    LightWater,
    NeedsWater,
}

impl WateringStatus {
    /// Whether this tier should be part of a watering alert.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, WateringStatus::Ok)
    }
}

/// Dosing for a single humidity deficit.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Dosage {
    pub deficit_pct: f64,
    pub ml_needed: f64,
    pub drops_needed: u32,
    pub sprays_needed: u32,
    pub status: WateringStatus,
    pub message: String,
}

/// Watering recommendation for one plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WateringRecommendation {
    pub plant_id: String,
    pub plant_name: String,
    pub floor: i32,
    pub slot: i32,
    pub current_humidity_pct: f64,
    pub target_humidity_pct: f64,
    pub deficit_pct: f64,
    pub ml_needed: f64,
    pub drops_needed: u32,
    pub sprays_needed: u32,
    pub status: WateringStatus,
    pub message: String,
}

/// Aggregate counts over a batch of recommendations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct WateringSummary {
    pub total_plants: usize,
    pub needs_water: usize,
    pub light_water: usize,
    pub ok: usize,
    pub total_ml_needed: f64,
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

/// ntfy message priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotifyPriority {
    Min,
    Low,
    #[default]
    Default,
    High,
    Urgent,
}

impl NotifyPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyPriority::Min => "min",
            NotifyPriority::Low => "low",
            NotifyPriority::Default => "default",
            NotifyPriority::High => "high",
            NotifyPriority::Urgent => "urgent",
        }
    }
}

impl FromStr for NotifyPriority {
    type Err = Error;

    /// Accepts ntfy's names and their numeric aliases 1-5.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "min" | "1" => Ok(NotifyPriority::Min),
            "low" | "2" => Ok(NotifyPriority::Low),
            "default" | "3" => Ok(NotifyPriority::Default),
            "high" | "4" => Ok(NotifyPriority::High),
            "urgent" | "max" | "5" => Ok(NotifyPriority::Urgent),
            other => Err(Error::InvalidInput(format!(
                "unknown notification priority: {}",
                other
            ))),
        }
    }
}

/// A push message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    pub priority: NotifyPriority,
    pub tags: String,
}

/// Outcome of an alert dispatch. Never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotificationResult {
    pub sent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plants_notified: Option<usize>,
}

impl NotificationResult {
    pub fn sent(plants_notified: usize) -> Self {
        Self {
            sent: true,
            reason: None,
            plants_notified: Some(plants_notified),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            sent: false,
            reason: Some(reason.into()),
            plants_notified: None,
        }
    }
}
