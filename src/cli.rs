use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "visit-report")]
#[command(about = "Relatorio de visitas em PDF a partir de fotos de check-in/check-out", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log detalhado
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Gera o relatorio PDF a partir de um JSON de visitas
    Report {
        /// Arquivo JSON com as visitas
        #[arg(required = true)]
        input: PathBuf,

        /// Diretorio de saida (padrao: diretorio atual)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Nome do promotor (entra no titulo e no nome do arquivo)
        #[arg(short, long)]
        subject: Option<String>,

        /// Inicio do periodo (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Fim do periodo, dia inteiro incluso (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Busca fotos em um diretorio local em vez de http(s)
        #[arg(long)]
        photo_root: Option<PathBuf>,
    },

    /// Redimensiona as fotos de uma pasta
    Resize {
        /// Pasta com as fotos originais
        #[arg(required = true)]
        folder: PathBuf,

        /// Pasta de saida (padrao: <pasta>/resized)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Qualidade (high/medium/low)
        #[arg(short, long, default_value = "medium")]
        quality: ImageQuality,
    },

    /// Diagnostico do storage de objetos (escrita/leitura/URL assinada)
    Storage {
        /// Raiz do storage local (padrao: valor da config)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Prefixo das chaves de teste
        #[arg(long, default_value = "diagnostics")]
        prefix: String,
    },

    /// Exibe/edita a configuracao
    Config {
        /// Define o nome padrao do promotor
        #[arg(long)]
        set_subject: Option<String>,

        /// Define a raiz do storage local
        #[arg(long)]
        set_storage_root: Option<PathBuf>,

        /// Exibe a configuracao
        #[arg(long)]
        show: bool,
    },
}

/// Resize quality preset.
#[derive(Clone, Copy, Debug, Default)]
pub enum ImageQuality {
    /// 1400px, JPEG 85%
    High,
    /// 800px, JPEG 75%
    #[default]
    Medium,
    /// 500px, JPEG 60%
    Low,
}

impl ImageQuality {
    /// Maximum pixel width after resizing.
    pub fn max_width(&self) -> u32 {
        match self {
            ImageQuality::High => 1400,
            ImageQuality::Medium => 800,
            ImageQuality::Low => 500,
        }
    }

    /// JPEG quality (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            ImageQuality::High => 85,
            ImageQuality::Medium => 75,
            ImageQuality::Low => 60,
        }
    }
}

impl std::str::FromStr for ImageQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" | "h" => Ok(ImageQuality::High),
            "medium" | "med" | "m" => Ok(ImageQuality::Medium),
            "low" | "l" => Ok(ImageQuality::Low),
            _ => Err(format!("Unknown quality: {}. Use high, medium, or low", s)),
        }
    }
}

impl std::fmt::Display for ImageQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageQuality::High => write!(f, "high"),
            ImageQuality::Medium => write!(f, "medium"),
            ImageQuality::Low => write!(f, "low"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_quality_from_str() {
        assert!(matches!("high".parse(), Ok(ImageQuality::High)));
        assert!(matches!("M".parse(), Ok(ImageQuality::Medium)));
        assert!(matches!("low".parse(), Ok(ImageQuality::Low)));
        assert!("ultra".parse::<ImageQuality>().is_err());
    }

    #[test]
    fn test_image_quality_presets() {
        assert_eq!(ImageQuality::High.max_width(), 1400);
        assert_eq!(ImageQuality::Medium.jpeg_quality(), 75);
    }
}
