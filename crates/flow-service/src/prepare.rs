//! Preparación de prendas subidas por el usuario.
//!
//! Llamadas directas y en orden: cada paso espera al anterior y cualquier
//! estado distinto de `finished` aborta con el nombre del paso. Los campos del
//! item se rellenan a medida que terminan los pasos; si algo falla, el item
//! queda con lo que llegó a completarse.

use flow_domain::{fit_for_generation, ApparelItems, GarmentDescription, Placement, ProcessingConfig};
use flow_ops::inputs::{CompositeElement, CompositeInput, CropInput, CutInput, Fit, GptInput, ObjectDetectionInput,
                       SegmentMaskInput};
use flow_ops::prompts;
use log::{debug, info};
use uuid::Uuid;

use crate::api::{run_and_wait, ImageService, OperationsService};
use crate::error::ServiceError;
use crate::types::{ImageEntity, ImageFile, OperationRecord};

/// SAM con umbral -1 devuelve la máscara completa de la caja.
const FULL_MASK_THRESHOLD: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreparationMode {
    /// Redimensionar y describir; `image_id` pasa a ser la imagen
    /// redimensionada (generación Linda).
    Describe,
    /// Además recorta la prenda y la centra en el lienzo; el resultado queda en
    /// `processed_image_id` (generación Naomi).
    Cutout,
}

pub struct ApparelPreparer<'a, S: ?Sized> {
    service: &'a S,
    config: &'a ProcessingConfig,
}

impl<'a, S> ApparelPreparer<'a, S> where S: OperationsService + ImageService + ?Sized
{
    pub fn new(service: &'a S, config: &'a ProcessingConfig) -> Self {
        Self { service, config }
    }

    /// Sube el archivo y prepara un item nuevo en `items`. Devuelve su id.
    pub async fn add_item(&self,
                          items: &mut ApparelItems,
                          file: ImageFile,
                          mode: PreparationMode)
                          -> Result<Uuid, ServiceError> {
        let id = items.add_pending();
        let image = self.service.create_from_file(file).await?;
        if mode == PreparationMode::Cutout {
            items.update(id, |item| item.image_id = Some(image.id.clone()))?;
        }

        let garment_id = self.resize(&image).await?;
        let description = self.describe(&garment_id).await?;
        items.update(id, |item| {
                 item.apply_description(&description);
                 if mode == PreparationMode::Describe {
                     item.image_id = Some(garment_id.clone());
                 }
             })?;
        if mode == PreparationMode::Describe {
            info!("prepare:done item={id} image={garment_id} category={}", description.product_category);
            return Ok(id);
        }

        let label = description.detection_label();
        let cut_id = if description.has_human {
            self.cut_apparel_on_model(&label, &garment_id).await?
        } else {
            self.cut_object(&label, &garment_id).await?
        };
        let processed_id = self.place_on_canvas(&cut_id).await?;
        items.update(id, |item| item.processed_image_id = Some(processed_id.clone()))?;
        info!("prepare:done item={id} processed={processed_id} category={}", description.product_category);
        Ok(id)
    }

    /// Lleva la imagen a un tamaño apto para generación (ver
    /// `fit_for_generation`). Si ya lo es, devuelve el mismo id.
    pub async fn resize(&self, image: &ImageEntity) -> Result<String, ServiceError> {
        let Some(target) = fit_for_generation(image.size()?, self.config.max_image_side, self.config.dimension_multiple)
        else {
            return Ok(image.id.clone());
        };
        debug!("prepare:resize image={} {}x{} -> {target}", image.id, image.width, image.height);
        let input = CompositeInput::single(target.width,
                                           target.height,
                                           CompositeElement { image_id: image.id.as_str().into(),
                                                              placement: Placement { left: 0,
                                                                                     top: 0,
                                                                                     width: target.width,
                                                                                     height: target.height },
                                                              fit: Fit::Cover });
        run_and_wait(self.service, input, "resize").await?.image_id()
    }

    pub async fn describe(&self, image_id: &str) -> Result<GarmentDescription, ServiceError> {
        let record = run_and_wait(self.service,
                                  GptInput { prompt: prompts::DESCRIBE_GARMENT.into(),
                                             image_id: Some(image_id.into()) },
                                  "describe").await?;
        record.data()
    }

    /// Recorte de una prenda sin persona: se añade margen blanco para que la
    /// detección no toque los bordes.
    pub async fn cut_object(&self, label: &str, image_id: &str) -> Result<String, ServiceError> {
        let image = self.service
                        .get(image_id)
                        .await?
                        .ok_or_else(|| ServiceError::NotFound(format!("image {image_id}")))?;
        let size = image.size()?;
        let padding = self.config.cut_padding;
        let padded = size.padded(padding)?;
        let framed = run_and_wait(self.service,
                                  CompositeInput::single(padded.width,
                                                         padded.height,
                                                         CompositeElement { image_id: image_id.into(),
                                                                            placement: Placement { left: padding,
                                                                                                   top: padding,
                                                                                                   width: size.width,
                                                                                                   height: size.height },
                                                                            fit: Fit::Contain }),
                                  "pad").await?
                                        .image_id()?;

        let region = self.detect(label, &framed).await?;
        let mask = run_and_wait(self.service,
                                SegmentMaskInput { image_id: framed.as_str().into(),
                                                   region: region.to_vec().into(),
                                                   mask_threshold: Some(FULL_MASK_THRESHOLD) },
                                "segment").await?
                                          .image_id()?;
        self.cut(&framed, &mask).await
    }

    /// Recorte de una prenda puesta: se recorta a la caja detectada y se
    /// segmenta la imagen recortada completa.
    pub async fn cut_apparel_on_model(&self, label: &str, image_id: &str) -> Result<String, ServiceError> {
        let region = crop_region(&self.detect(label, image_id).await?);
        let cropped = run_and_wait(self.service,
                                   CropInput { image_id: image_id.into(),
                                               region },
                                   "crop").await?
                                          .image_id()?;
        let whole = vec![0, 0, region.width, region.height];
        let mask = run_and_wait(self.service,
                                SegmentMaskInput { image_id: cropped.as_str().into(),
                                                   region: whole.into(),
                                                   mask_threshold: Some(FULL_MASK_THRESHOLD) },
                                "segment").await?
                                          .image_id()?;
        self.cut(&cropped, &mask).await
    }

    /// Centra la prenda recortada en el lienzo final.
    pub async fn place_on_canvas(&self, image_id: &str) -> Result<String, ServiceError> {
        let canvas = self.config.canvas;
        let input = CompositeInput::single(canvas.width,
                                           canvas.height,
                                           CompositeElement { image_id: image_id.into(),
                                                              placement: canvas.placement(),
                                                              fit: Fit::Contain });
        run_and_wait(self.service, input, "canvas").await?.image_id()
    }

    async fn detect(&self, label: &str, image_id: &str) -> Result<[f64; 4], ServiceError> {
        let record = run_and_wait(self.service,
                                  ObjectDetectionInput { image_id: image_id.into(),
                                                         labels: vec![label.to_string()] },
                                  "detect").await?;
        first_box(&record)
    }

    async fn cut(&self, image_id: &str, mask_id: &str) -> Result<String, ServiceError> {
        run_and_wait(self.service,
                     CutInput { image_id: image_id.into(),
                                mask_image_id: mask_id.into() },
                     "cut").await?
                           .image_id()
    }
}

/// Primera caja `[x0, y0, x1, y1]` de una detección.
fn first_box(record: &OperationRecord) -> Result<[f64; 4], ServiceError> {
    let boxes: Vec<Vec<f64>> = record.data()?;
    match boxes.first().map(Vec::as_slice) {
        Some([x0, y0, x1, y1, ..]) => {
            let b = [*x0, *y0, *x1, *y1];
            if b.iter().any(|v| !v.is_finite() || *v < 0.0) || x1 <= x0 || y1 <= y0 {
                return Err(ServiceError::Decode(format!("object detection returned a degenerate box {b:?}")));
            }
            Ok(b)
        }
        _ => Err(ServiceError::Decode("object detection returned no box".into())),
    }
}

/// Región de recorte: origen hacia abajo, tamaño hacia arriba.
fn crop_region(b: &[f64; 4]) -> Placement {
    Placement { left: b[0].floor() as u32,
                top: b[1].floor() as u32,
                width: (b[2] - b[0]).ceil() as u32,
                height: (b[3] - b[1]).ceil() as u32 }
}
