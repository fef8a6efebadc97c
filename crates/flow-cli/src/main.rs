//! CLI: construye el template de una receta y lo imprime en formato wire.
//! Con `--submit` lo envía además al servicio en memoria.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use flow_core::InMemorySubmissionLedger;
use flow_domain::config::init_dotenv;
use flow_domain::{ApparelItem, AspectRatio, GenerationConfig, ImageSize, ModelTraits, Pose};
use flow_ops::{linda_pipeline, naomi_pipeline, prompts, random_seed, ChipSelection, LindaRequest, NaomiRequest,
               PipelineDraft, PromptSource};
use flow_service::{InMemoryService, PipelineSubmitter};
use log::{error, info};

#[derive(Parser)]
#[command(name = "apparelflow")]
#[command(about = "Build generation pipeline templates for apparel photos")]
struct Cli {
    /// Send the template to the in-memory pipeline service after building it
    #[arg(long, global = true)]
    submit: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Garment placed on a model in a chosen pose
    Naomi {
        #[command(flatten)]
        common: CommonArgs,

        /// Processed (cut and centered) garment image id
        #[arg(long)]
        processed_image_id: String,

        /// Garment category, e.g. "t-shirt"
        #[arg(long)]
        category: String,

        /// Garment photo already shows a person
        #[arg(long)]
        has_human: bool,

        #[arg(long)]
        pose_id: String,

        #[arg(long)]
        pose_preview_id: String,

        /// Advanced prompt; skips prompt generation
        #[arg(long)]
        advanced_prompt: Option<String>,
    },

    /// Several product photos from the original garment image
    Linda {
        #[command(flatten)]
        common: CommonArgs,

        /// Final prompt; when absent it is generated from the garment photo
        #[arg(long)]
        final_prompt: Option<String>,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Uploaded garment image id
    #[arg(long)]
    image_id: String,

    /// Personal collection receiving the result stacks
    #[arg(long)]
    collection_id: String,

    /// Aspect ratio as "W:H"
    #[arg(long, default_value = "2:3")]
    aspect_ratio: AspectRatio,

    #[arg(long, default_value_t = 832)]
    width: u32,

    #[arg(long, default_value_t = 1216)]
    height: u32,

    /// Random when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Model traits as "age,gender,model"
    #[arg(long)]
    model: Option<String>,

    #[arg(long)]
    background: Option<String>,

    /// User prompt chip
    #[arg(long)]
    prompt: Option<String>,
}

impl CommonArgs {
    fn chips(&self) -> Result<ChipSelection, String> {
        let model = match &self.model {
            None => None,
            Some(raw) => {
                let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
                match parts.as_slice() {
                    [age, gender, model] => Some(ModelTraits { age: age.to_string(),
                                                               gender: gender.to_string(),
                                                               model: model.to_string() }),
                    _ => return Err(format!("--model expects \"age,gender,model\", got \"{raw}\"")),
                }
            }
        };
        Ok(ChipSelection { model,
                           background: self.background.clone(),
                           prompt: self.prompt.clone() })
    }

    fn size(&self) -> Result<ImageSize, String> {
        ImageSize::new(self.width, self.height).map_err(|e| e.to_string())
    }
}

fn build(command: &Commands, config: &GenerationConfig) -> Result<PipelineDraft, String> {
    match command {
        Commands::Naomi { common,
                          processed_image_id,
                          category,
                          has_human,
                          pose_id,
                          pose_preview_id,
                          advanced_prompt, } => {
            let item = ApparelItem { image_id: Some(common.image_id.clone()),
                                     processed_image_id: Some(processed_image_id.clone()),
                                     category: Some(category.clone()),
                                     has_human: Some(*has_human),
                                     ..ApparelItem::new() };
            let prompt = match advanced_prompt {
                Some(p) => PromptSource::Literal(p.clone()),
                None => PromptSource::Generate { instructions: naomi_instructions(common, category) },
            };
            let req = NaomiRequest { item,
                                     pose: Some(Pose { id: pose_id.clone(),
                                                       preview_image_id: pose_preview_id.clone() }),
                                     size: common.size()?,
                                     aspect_ratio: common.aspect_ratio,
                                     prompt,
                                     chips: common.chips()?,
                                     seed: common.seed.unwrap_or_else(random_seed),
                                     collection_id: common.collection_id.clone() };
            naomi_pipeline(&req, config).map_err(|e| e.to_string())
        }
        Commands::Linda { common, final_prompt } => {
            let prompt = match final_prompt {
                Some(p) => PromptSource::Literal(p.clone()),
                None => PromptSource::Generate { instructions: prompts::LINDA_PROMPT_INSTRUCTIONS.to_string() },
            };
            let req = LindaRequest { item: ApparelItem { image_id: Some(common.image_id.clone()),
                                                         ..ApparelItem::new() },
                                     size: common.size()?,
                                     aspect_ratio: common.aspect_ratio,
                                     prompt,
                                     chips: common.chips()?,
                                     seed: common.seed.unwrap_or_else(random_seed),
                                     collection_id: common.collection_id.clone() };
            linda_pipeline(&req, config).map_err(|e| e.to_string())
        }
    }
}

/// Instrucciones de generación de prompt a partir de las elecciones del usuario.
fn naomi_instructions(common: &CommonArgs, category: &str) -> String {
    let mut text = format!("Propose prompt to generate attractive photo of a model wearing {category} for e-commerce product card.");
    if let Some(model) = &common.model {
        text.push_str(&format!("\n- Model: {model}"));
    }
    if let Some(background) = &common.background {
        text.push_str(&format!("\n- Background: {background}"));
    }
    if let Some(prompt) = &common.prompt {
        text.push_str(&format!("\n- Details: {prompt}"));
    }
    text.push_str("\n\nReturn it in JSON format like { prompt }");
    text
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("APPARELFLOW_LOG", "info")).init();

    let cli = Cli::parse();
    let config = match GenerationConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("config: {e}");
            return ExitCode::from(3);
        }
    };
    let draft = match build(&cli.command, &config) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("[apparelflow] {e}");
            return ExitCode::from(2);
        }
    };
    info!("template {} built with {} steps (fingerprint {})",
          draft.template.id(),
          draft.template.len(),
          draft.template.fingerprint());

    match serde_json::to_string_pretty(&draft.template.to_wire()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("[apparelflow] {e}");
            return ExitCode::from(5);
        }
    }

    if cli.submit {
        let submitter = PipelineSubmitter::new(InMemoryService::new(), InMemorySubmissionLedger::new());
        match submitter.submit(&draft.template).await {
            Ok(s) => info!("pipeline {} created (submission #{})", s.pipeline_id, s.record.seq),
            Err(e) => {
                eprintln!("[apparelflow] submit failed: {e}");
                return ExitCode::from(4);
            }
        }
    }
    ExitCode::SUCCESS
}
