#![allow(dead_code)]

//! Hand-assembled FIT payloads for decoding tests.

/// FIT timestamp of 2021-09-08T01:46:40Z.
pub const START: u32 = 1_000_000_000;

const ENUM: u8 = 0x00;
const SINT8: u8 = 0x01;
const UINT8: u8 = 0x02;
const UINT16: u8 = 0x84;
const UINT32: u8 = 0x86;

pub struct FitBuilder {
    data: Vec<u8>,
}

impl FitBuilder {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Definition message; each field is `(number, size, base_type)`.
    pub fn define(mut self, local: u8, global: u16, fields: &[(u8, u8, u8)]) -> Self {
        self.data.push(0x40 | local);
        self.data.push(0);
        self.data.push(0);
        self.data.extend_from_slice(&global.to_le_bytes());
        self.data.push(fields.len() as u8);
        for (number, size, base_type) in fields {
            self.data.extend_from_slice(&[*number, *size, *base_type]);
        }
        self
    }

    pub fn data(mut self, local: u8, values: &[u8]) -> Self {
        self.data.push(local);
        self.data.extend_from_slice(values);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut header = vec![14u8, 0x10];
        header.extend_from_slice(&2132u16.to_le_bytes());
        header.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
        header.extend_from_slice(b".FIT");
        let header_crc = calculate_crc(&header);
        header.extend_from_slice(&header_crc.to_le_bytes());

        let mut file = header;
        file.extend_from_slice(&self.data);
        let crc = calculate_crc(&file);
        file.extend_from_slice(&crc.to_le_bytes());
        file
    }
}

fn calculate_crc(data: &[u8]) -> u16 {
    const CRC_TABLE: [u16; 16] = [
        0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401, 0xA001, 0x6C00, 0x7800,
        0xB401, 0x5000, 0x9C01, 0x8801, 0x4400,
    ];

    data.iter().fold(0u16, |crc, byte| {
        let mut tmp = CRC_TABLE[(crc & 0xF) as usize];
        let mut crc = (crc >> 4) & 0x0FFF;
        crc ^= tmp ^ CRC_TABLE[(byte & 0xF) as usize];
        tmp = CRC_TABLE[(crc & 0xF) as usize];
        crc = (crc >> 4) & 0x0FFF;
        crc ^ tmp ^ CRC_TABLE[((byte >> 4) & 0xF) as usize]
    })
}

fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

fn file_id(builder: FitBuilder) -> FitBuilder {
    // type = activity
    builder.define(0, 0, &[(0, 1, ENUM)]).data(0, &[4])
}

fn record(builder: FitBuilder, offset: u32, heart_rate: u8) -> FitBuilder {
    // altitude raw 2600 -> 20.0 m, temperature left invalid
    builder.data(
        2,
        &concat(&[
            &(START + offset).to_le_bytes(),
            &[heart_rate],
            &2600u16.to_le_bytes(),
            &[0x7F],
        ]),
    )
}

/// file_id, a timer start event, two records, one lap, then the activity message.
pub fn activity_fit() -> Vec<u8> {
    let builder = file_id(FitBuilder::new())
        .define(1, 21, &[(253, 4, UINT32), (0, 1, ENUM), (1, 1, ENUM)])
        .data(1, &concat(&[&START.to_le_bytes(), &[0, 0]]))
        .define(2, 20, &[(253, 4, UINT32), (3, 1, UINT8), (2, 2, UINT16), (13, 1, SINT8)]);
    let builder = record(builder, 1, 150);
    let builder = record(builder, 2, 151);

    builder
        .define(3, 19, &[(253, 4, UINT32), (7, 4, UINT32), (15, 1, UINT8)])
        .data(
            3,
            &concat(&[&(START + 60).to_le_bytes(), &120_000u32.to_le_bytes(), &[0xFF]]),
        )
        .define(4, 34, &[(253, 4, UINT32)])
        .data(4, &(START + 60).to_le_bytes())
        .build()
}

/// A well-formed file without an activity message.
pub fn records_only_fit() -> Vec<u8> {
    let builder = file_id(FitBuilder::new())
        .define(2, 20, &[(253, 4, UINT32), (3, 1, UINT8), (2, 2, UINT16), (13, 1, SINT8)]);
    record(builder, 1, 140).build()
}

/// Cycling/racket fields fitparser hands back as unnamed enums or composites:
/// two records (balance, stroke, cycles, compressed power), one lap with a
/// two-byte balance, then the activity message.
pub fn pedal_fit() -> Vec<u8> {
    file_id(FitBuilder::new())
        .define(
            2,
            20,
            &[
                (253, 4, UINT32),
                (30, 1, UINT8),
                (49, 1, ENUM),
                (18, 1, UINT8),
                (28, 2, UINT16),
            ],
        )
        .data(
            2,
            &concat(&[
                &(START + 1).to_le_bytes(),
                &[0x80 | 37, 1, 5],
                &100u16.to_le_bytes(),
            ]),
        )
        .data(
            2,
            &concat(&[
                &(START + 2).to_le_bytes(),
                &[0xFF, 9, 0xFF],
                &0xFFFFu16.to_le_bytes(),
            ]),
        )
        .define(3, 19, &[(253, 4, UINT32), (34, 2, UINT16)])
        .data(3, &concat(&[&(START + 60).to_le_bytes(), &4250u16.to_le_bytes()]))
        .define(4, 34, &[(253, 4, UINT32)])
        .data(4, &(START + 60).to_le_bytes())
        .build()
}
