//! OME-XML serialization

use std::fmt::{self, Write};

use crate::image_utils::ome::types::{OmeChannel, OmeImage, OmeMetadata, OmePixels};

const OME_NAMESPACE: &str = "http://www.openmicroscopy.org/Schemas/OME/2016-06";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

impl OmeMetadata {
    /// Serializes the record to OME-XML text.
    pub fn to_xml(&self) -> String {
        self.to_string()
    }

    /// Streams the OME-XML document into `out`, stopping at the first write error.
    pub fn write_xml<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        out.write_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n")?;
        writeln!(
            out,
            "<OME xmlns=\"{ns}\" xmlns:xsi=\"{xsi}\" xsi:schemaLocation=\"{ns} {ns}/ome.xsd\">",
            ns = OME_NAMESPACE,
            xsi = XSI_NAMESPACE,
        )?;
        for image in &self.images {
            write_image(out, image)?;
        }
        out.write_str("</OME>\n")
    }
}

impl fmt::Display for OmeMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_xml(f)
    }
}

fn write_image<W: Write + ?Sized>(out: &mut W, image: &OmeImage) -> fmt::Result {
    writeln!(
        out,
        "  <Image ID=\"{}\" Name=\"{}\">",
        escape(&image.id),
        escape(&image.name)
    )?;
    write_pixels(out, &image.pixels)?;
    out.write_str("  </Image>\n")
}

fn write_pixels<W: Write + ?Sized>(out: &mut W, pixels: &OmePixels) -> fmt::Result {
    writeln!(
        out,
        "    <Pixels ID=\"{}\" DimensionOrder=\"{}\" Type=\"{}\" SizeX=\"{}\" SizeY=\"{}\" SizeZ=\"{}\" SizeC=\"{}\" SizeT=\"{}\" PhysicalSizeX=\"{:?}\" PhysicalSizeY=\"{:?}\" BigEndian=\"{}\">",
        escape(&pixels.id),
        pixels.dimension_order,
        pixels.pixel_type.ome_name(),
        pixels.size_x,
        pixels.size_y,
        pixels.size_z,
        pixels.size_c,
        pixels.size_t,
        pixels.physical_size_x,
        pixels.physical_size_y,
        pixels.big_endian,
    )?;
    for channel in &pixels.channels {
        write_channel(out, channel)?;
    }
    if pixels.metadata_only {
        out.write_str("      <MetadataOnly/>\n")?;
    }
    out.write_str("    </Pixels>\n")
}

fn write_channel<W: Write + ?Sized>(out: &mut W, channel: &OmeChannel) -> fmt::Result {
    writeln!(
        out,
        "      <Channel ID=\"{}\" Name=\"{}\" Color=\"{}\" SamplesPerPixel=\"1\"/>",
        escape(&channel.id),
        escape(&channel.name),
        channel.color.to_ome_int()
    )
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
