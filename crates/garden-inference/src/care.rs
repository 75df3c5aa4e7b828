//! AI plant-care lookups.
//!
//! Two prompts share the same chat backend: a short growing profile used by
//! the care-data fallback chain, and a detailed care guide served by the
//! guide endpoint. Both ask the model for bare JSON, but models still wrap
//! answers in markdown fences now and then, so replies go through
//! [`strip_code_fences`] before parsing.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use garden_core::floors::numeric;
use garden_core::{
    defaults, CareSource, CareSourceKind, Error, GenerationBackend, GenerationParams,
    PlantCareGuide, PlantCareProfile, Result,
};

const PROFILE_SYSTEM_PROMPT: &str = r#"És um especialista em horticultura. Quando te perguntarem sobre uma planta, responde APENAS com um JSON válido com esta estrutura exacta:
{
    "ciclo_total": <número de dias do ciclo de vida>,
    "targets_humidade": <percentagem ideal de humidade do solo>,
    "temperatura_ideal": "<range de temperatura em Celsius>",
    "luz": "<requisitos de luz>",
    "descricao": "<descrição breve com dicas de cultivo>"
}
Não incluas markdown, apenas o JSON puro."#;

const GUIDE_SYSTEM_PROMPT: &str = r#"És um especialista em horticultura e jardinagem. Quando te perguntarem sobre uma planta, fornece informações detalhadas e práticas em português de Portugal.

Responde APENAS com um JSON válido com esta estrutura exacta (sem markdown):
{
  "nome_cientifico": "<nome científico da planta>",
  "familia": "<família botânica>",
  "origem": "<região de origem>",
  "descricao": "<descrição geral da planta, 2-3 frases>",
  "beneficios": ["<benefício 1>", "<benefício 2>", "<benefício 3>"],
  "cuidados": {
    "rega": {"frequencia": "<frequência recomendada>", "quantidade": "<quantidade aproximada>", "dicas": "<dicas de rega>"},
    "luz": {"tipo": "<tipo de luz ideal>", "horas": "<horas de luz por dia>", "dicas": "<dicas sobre exposição solar>"},
    "solo": {"tipo": "<tipo de solo recomendado>", "ph": "<pH ideal>", "drenagem": "<requisitos de drenagem>"},
    "temperatura": {"ideal": "<temperatura ideal em °C>", "minima": "<mínima tolerada>", "maxima": "<máxima tolerada>"},
    "humidade": {"ideal": "<humidade do ar ideal em %>", "dicas": "<dicas para manter a humidade>"},
    "fertilizacao": {"frequencia": "<frequência>", "tipo": "<tipo de fertilizante>", "epoca": "<melhor época>"}
  },
  "pragas_doencas": [{"nome": "<praga/doença comum>", "prevencao": "<como prevenir>"}],
  "colheita": {"tempo": "<tempo até colheita>", "sinais": "<sinais de maturidade>", "metodo": "<como colher>"},
  "dicas_extras": ["<dica extra 1>", "<dica extra 2>"],
  "curiosidades": ["<curiosidade 1>", "<curiosidade 2>"]
}

Não incluas markdown, código de formatação ou texto adicional. Apenas o JSON puro."#;

/// Remove markdown code fences (and a `json` language tag) around a reply.
///
/// When the reply still does not start with `{`, the outermost `{ ... }`
/// span is returned instead, which drops chatty preambles.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        let inner = rest.split("```").next().unwrap_or(rest);
        text = inner.strip_prefix("json").unwrap_or(inner).trim();
    }

    if !text.starts_with('{') {
        if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
            if start < end {
                text = &text[start..=end];
            }
        }
    }

    text
}

fn text_field(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn number_field(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().filter_map(|k| obj.get(*k)).find_map(numeric)
}

/// Parse the model's growing-profile answer.
///
/// Accepts the Portuguese keys the prompt asks for as well as the English
/// field names. Numbers may arrive as strings. Missing text fields fall back
/// to the generic profile; a missing or out-of-range cycle or humidity is an
/// error.
pub fn parse_care_profile(plant_name: &str, raw: &str) -> Result<PlantCareProfile> {
    let value: Value = serde_json::from_str(strip_code_fences(raw))?;
    let obj = value
        .as_object()
        .ok_or_else(|| Error::Inference("care profile is not a JSON object".to_string()))?;

    let cycle = number_field(obj, &["ciclo_total", "cycle_days"])
        .ok_or_else(|| Error::Inference("care profile has no cycle length".to_string()))?;
    let humidity = number_field(obj, &["targets_humidade", "target_humidity_pct"])
        .ok_or_else(|| Error::Inference("care profile has no target humidity".to_string()))?;

    if !cycle.is_finite() || cycle < 1.0 || cycle > u32::MAX as f64 {
        return Err(Error::Inference(format!("invalid cycle length: {}", cycle)));
    }
    if !(0.0..=100.0).contains(&humidity) {
        return Err(Error::Inference(format!("invalid target humidity: {}", humidity)));
    }

    let generic = PlantCareProfile::generic(plant_name);
    Ok(PlantCareProfile {
        cycle_days: cycle.round() as u32,
        target_humidity_pct: humidity.round() as u8,
        ideal_temperature_range: text_field(obj, &["temperatura_ideal", "ideal_temperature_range"])
            .unwrap_or(generic.ideal_temperature_range),
        light_requirement: text_field(obj, &["luz", "light_requirement"])
            .unwrap_or(generic.light_requirement),
        description: text_field(obj, &["descricao", "description"]).unwrap_or(generic.description),
    })
}

/// AI stage of the care-data fallback chain.
pub struct AiCareSource {
    backend: Arc<dyn GenerationBackend>,
}

impl AiCareSource {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl CareSource for AiCareSource {
    fn kind(&self) -> CareSourceKind {
        CareSourceKind::Ai
    }

    async fn lookup(&self, plant_name: &str) -> Option<PlantCareProfile> {
        let start = Instant::now();
        let params = GenerationParams {
            temperature: Some(defaults::AI_PROFILE_TEMPERATURE),
            max_tokens: None,
        };
        let prompt = format!("Dados de cultivo para: {}", plant_name);

        let outcome = match self
            .backend
            .generate_with_system(PROFILE_SYSTEM_PROMPT, &prompt, params)
            .await
        {
            Ok(reply) => parse_care_profile(plant_name, &reply),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(profile) => {
                debug!(
                    subsystem = "inference",
                    component = "care",
                    op = "profile_lookup",
                    plant_name = %plant_name,
                    model = %self.backend.model_name(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "AI care profile resolved"
                );
                Some(profile)
            }
            Err(e) => {
                warn!(
                    subsystem = "inference",
                    component = "care",
                    op = "profile_lookup",
                    plant_name = %plant_name,
                    error = %e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "AI care lookup failed"
                );
                None
            }
        }
    }
}

/// Ask the model for a detailed care guide.
///
/// Returns `None` when the call fails or the answer is not valid JSON; the
/// caller then serves [`PlantCareGuide::generic`].
pub async fn generate_care_guide(
    backend: &dyn GenerationBackend,
    plant_name: &str,
) -> Option<PlantCareGuide> {
    let start = Instant::now();
    let params = GenerationParams {
        temperature: Some(defaults::AI_GUIDE_TEMPERATURE),
        max_tokens: Some(defaults::AI_GUIDE_MAX_TOKENS),
    };
    let prompt = format!(
        "Fornece informações completas de cuidados para a planta: {}",
        plant_name
    );

    let outcome = match backend
        .generate_with_system(GUIDE_SYSTEM_PROMPT, &prompt, params)
        .await
    {
        Ok(reply) => serde_json::from_str::<PlantCareGuide>(strip_code_fences(&reply))
            .map_err(Error::from),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(guide) => {
            debug!(
                subsystem = "inference",
                component = "care",
                op = "guide",
                plant_name = %plant_name,
                duration_ms = start.elapsed().as_millis() as u64,
                "AI care guide generated"
            );
            Some(guide)
        }
        Err(e) => {
            warn!(
                subsystem = "inference",
                component = "care",
                op = "guide",
                plant_name = %plant_name,
                error = %e,
                "AI care guide failed"
            );
            None
        }
    }
}
