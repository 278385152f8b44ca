use super::resolver::AmountResolver;
use crate::domain::boleto::BoletoData;
use crate::domain::mpm::PixData;
use crate::domain::payment::{PayInput, PayOutput, PaymentType};
use crate::domain::ports::MpmDecoderBox;
use crate::error::Result;
use tracing::{debug, info};

/// Turns raw bar codes into payment results.
///
/// PIX codes go through the EMV decoder and the amount resolver; a PIX result
/// is only returned once its amount is known. Boleto line codes are decoded
/// locally.
pub struct PaymentDecoder {
    decoder: MpmDecoderBox,
    resolver: AmountResolver,
}

impl PaymentDecoder {
    pub fn new(decoder: MpmDecoderBox, resolver: AmountResolver) -> Self {
        Self { decoder, resolver }
    }

    pub async fn decode_pix(&self, raw: &str) -> Result<PixData> {
        let code = self.decoder.decode(raw)?;
        debug!(merchant = %code.merchant_name, "decoded EMV payload");

        let amount = self.resolver.resolve(&code).await?;
        info!(amount_cents = amount, "resolved PIX transaction amount");
        Ok(PixData::new(code, amount))
    }

    pub fn decode_boleto(&self, raw: &str) -> Result<BoletoData> {
        let boleto = BoletoData::from_line_code(raw.trim())?;
        info!(bank_code = %boleto.bank_code, value = %boleto.value, "decoded boleto");
        Ok(boleto)
    }

    /// Decodes a submitted bar code, picking the format from its content.
    pub async fn decode(&self, input: &PayInput) -> Result<PayOutput> {
        match PaymentType::classify(&input.bar_code) {
            PaymentType::Pix => Ok(PayOutput::pix(self.decode_pix(&input.bar_code).await?)),
            PaymentType::Boleto => Ok(PayOutput::boleto(self.decode_boleto(&input.bar_code)?)),
        }
    }
}
