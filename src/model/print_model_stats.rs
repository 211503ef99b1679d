use std::fmt;

use crate::error::TopologyError;

use super::{layer_type::ParameterCounts, model::ModelDesc, tensor_desc::TensorDesc};

const RULE_WIDTH: usize = 90;

// Everything the table needs, resolved up front so rendering cannot fail
struct ModelStats<'a> {
    model: &'a ModelDesc,
    shapes: Vec<TensorDesc>,
    params: Vec<ParameterCounts>,
    totals: ParameterCounts,
}

impl fmt::Display for ModelStats<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data_format = self.model.data_format();

        writeln!(f, "Model: \"{}\"", self.model.name)?;
        writeln!(f, "Input: {:?} ({})", self.model.input_shape.dims(), data_format)?;
        writeln!(f, "{:-<w$}", "", w = RULE_WIDTH)?;
        writeln!(
            f,
            "{:<32} {:<22} {:>12}   {}",
            "Layer (type)", "Output Shape", "Param #", "Config"
        )?;
        writeln!(f, "{:=<w$}", "", w = RULE_WIDTH)?;

        let rows = self.model.layers().iter().zip(&self.shapes).zip(&self.params);
        for ((layer, shape), count) in rows {
            writeln!(
                f,
                "{:<32} {:<22} {:>12}   {}",
                layer.label(),
                shape.format_with_batch(data_format),
                group_thousands(count.total()),
                layer.layer_type.config_string().unwrap_or_default()
            )?;
        }

        writeln!(f, "{:=<w$}", "", w = RULE_WIDTH)?;
        writeln!(f, "Total params: {}", group_thousands(self.totals.total()))?;
        writeln!(f, "Trainable params: {}", group_thousands(self.totals.trainable))?;
        writeln!(f, "Non-trainable params: {}", group_thousands(self.totals.non_trainable))?;
        writeln!(f, "{:-<w$}", "", w = RULE_WIDTH)
    }
}

pub fn format_model_stats(model: &ModelDesc) -> Result<String, TopologyError> {
    let stats = ModelStats {
        model,
        shapes: model.output_shapes()?,
        params: model.layer_parameter_counts()?,
        totals: model.parameter_counts()?,
    };
    Ok(stats.to_string())
}

pub fn print_model_stats(model: &ModelDesc) -> Result<(), TopologyError> {
    print!("{}", format_model_stats(model)?);
    Ok(())
}

// 2171178 -> "2,171,178"
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
