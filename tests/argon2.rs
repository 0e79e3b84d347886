use argon2_phc::{Argon2, Argon2Error, DecodeError, ParamError, Params, Variant, Version, derive};

fn hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

fn params(variant: Variant, t: u32, m: u32, p: u32) -> Params {
    Params::new(variant, t, m, p).unwrap()
}

const ALL_VARIANTS: [Variant; 3] = [Variant::Argon2d, Variant::Argon2i, Variant::Argon2id];

// -------------------------------------------------------
// RFC 9106 §5 TEST VECTORS (version 0x13)
// -------------------------------------------------------
//
//   password: 32 bytes of 0x01
//   salt: 16 bytes of 0x02
//   secret: 8 bytes of 0x03
//   associated data: 12 bytes of 0x04
//   parallelism: 4, tag length: 32, memory: 32 KiB, iterations: 3

fn rfc9106_tag(variant: Variant) -> Vec<u8> {
    let password = [0x01u8; 32];
    let salt = [0x02u8; 16];
    let secret = [0x03u8; 8];
    let associated_data = [0x04u8; 12];

    derive(
        &params(variant, 3, 32, 4),
        &password,
        &salt,
        Some(&secret[..]),
        Some(&associated_data[..]),
    )
    .unwrap()
}

#[test]
fn argon2d_rfc9106_test_vector() {
    assert_eq!(
        rfc9106_tag(Variant::Argon2d),
        hex("512b391b6f1162975371d30919734294f868e3be3984f3c1a13a4db9fabe4acb"),
        "Argon2d output does not match RFC 9106 test vector"
    );
}

#[test]
fn argon2i_rfc9106_test_vector() {
    assert_eq!(
        rfc9106_tag(Variant::Argon2i),
        hex("c814d9d1dc7f37aa13f0d77f2494bda1c8de6b016dd388d29952a4c4672b6ce8"),
        "Argon2i output does not match RFC 9106 test vector"
    );
}

#[test]
fn argon2id_rfc9106_test_vector() {
    // Tag: 0d 64 0d f5 8d 78 76 6c 08 c0 37 a3 4a 8b 53 c9
    //      d0 1e f0 45 2d 75 b6 5e b5 25 20 e9 6b 01 e6 59
    let expected = [
        0x0d, 0x64, 0x0d, 0xf5, 0x8d, 0x78, 0x76, 0x6c, 0x08, 0xc0, 0x37, 0xa3, 0x4a, 0x8b, 0x53,
        0xc9, 0xd0, 0x1e, 0xf0, 0x45, 0x2d, 0x75, 0xb6, 0x5e, 0xb5, 0x25, 0x20, 0xe9, 0x6b, 0x01,
        0xe6, 0x59,
    ];

    assert_eq!(
        rfc9106_tag(Variant::Argon2id),
        expected,
        "Argon2id output does not match RFC 9106 test vector"
    );
}

#[test]
fn context_matches_free_function_with_keyed_inputs() {
    let password = [0x01u8; 32];
    let salt = [0x02u8; 16];
    let secret = [0x03u8; 8];
    let associated_data = [0x04u8; 12];

    let tag = Argon2::new(params(Variant::Argon2id, 3, 32, 4))
        .with_secret(&secret)
        .with_associated_data(&associated_data)
        .derive(&password, &salt)
        .unwrap();

    assert_eq!(tag, rfc9106_tag(Variant::Argon2id));
}

// -------------------------------------------------------
// REFERENCE CLI OUTPUTS (version 0x13)
// -------------------------------------------------------
//
//   password: "password", salt: "somesalt", t=2, m=64 MiB, p=1

#[test]
fn argon2i_v13_reference_output() {
    let p = params(Variant::Argon2i, 2, 65536, 1);
    assert_eq!(
        derive(&p, b"password", b"somesalt", None, None).unwrap(),
        hex("c1628832147d9720c5bd1cfd61367078729f6dfb6f8fea9ff98158e0d7816ed0")
    );
}

#[test]
fn argon2id_v13_reference_output() {
    let p = params(Variant::Argon2id, 2, 65536, 1);
    assert_eq!(
        derive(&p, b"password", b"somesalt", None, None).unwrap(),
        hex("09316115d5cf24ed5a15a31a3ba326e5cf32edc24702987c02b6566f61913cf7")
    );
}

// -------------------------------------------------------
// VERSION 0x10 REFERENCE OUTPUTS
// -------------------------------------------------------

/// Salt "somesalt" padded with NUL bytes to 16 bytes.
const PADDED_SALT: &[u8; 16] = b"somesalt\0\0\0\0\0\0\0\0";

#[test]
fn argon2i_v10_reference_output() {
    let p = params(Variant::Argon2i, 2, 65536, 4).with_version(Version::V0x10);
    let tag = derive(&p, b"password", PADDED_SALT, None, None).unwrap();
    assert_eq!(
        tag,
        hex("4162f32384d8f4790bd994cb73c83a4a29f076165ec18af3cfdcf10a8d1b9066")
    );
}

#[test]
fn argon2d_v10_reference_output() {
    let p = params(Variant::Argon2d, 2, 65536, 4).with_version(Version::V0x10);
    let tag = derive(&p, b"password", PADDED_SALT, None, None).unwrap();

    // This tag contains a NUL byte; it must survive untruncated.
    assert!(tag.contains(&0));
    assert_eq!(
        tag,
        hex("9ca3b9fc007d09daf489dcf854e9a785ff5a32c62ec50acf26477977add23225")
    );
}

#[test]
fn argon2i_v10_small_memory_outputs() {
    let one_lane = params(Variant::Argon2i, 2, 256, 1).with_version(Version::V0x10);
    assert_eq!(
        derive(&one_lane, b"password", b"somesalt", None, None).unwrap(),
        hex("fd4dd83d762c49bdeaf57c47bdcd0c2f1babf863fdeb490df63ede9975fccf06")
    );

    let two_lanes = params(Variant::Argon2i, 2, 256, 2).with_version(Version::V0x10);
    assert_eq!(
        derive(&two_lanes, b"password", b"somesalt", None, None).unwrap(),
        hex("b6c11560a6a9d61eac706b79a2f97d68b4463aa3ad87e00c07e2b01e90c564fb")
    );
}

#[test]
fn versions_produce_distinct_stable_tags() {
    // The version is hashed into H0, so tags differ even with one pass.
    let v10 = params(Variant::Argon2id, 1, 32, 1).with_version(Version::V0x10);
    let v13 = params(Variant::Argon2id, 1, 32, 1);

    let a = derive(&v10, b"password", b"saltsalt", None, None).unwrap();
    let b = derive(&v13, b"password", b"saltsalt", None, None).unwrap();
    assert_ne!(a, b);
    assert_eq!(a, derive(&v10, b"password", b"saltsalt", None, None).unwrap());
}

// -------------------------------------------------------
// DETERMINISM AND THREADING
// -------------------------------------------------------

#[test]
fn argon2_is_deterministic() {
    for variant in ALL_VARIANTS {
        let p = params(variant, 3, 32, 4);
        let a = derive(&p, b"password", b"saltsalt", None, None).unwrap();
        let b = derive(&p, b"password", b"saltsalt", None, None).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn thread_count_does_not_change_output() {
    for variant in ALL_VARIANTS {
        for version in [Version::V0x10, Version::V0x13] {
            let p = params(variant, 2, 256, 4).with_version(version);
            let reference = Argon2::new(p.clone())
                .with_threads(1)
                .derive(b"password", b"saltsalt")
                .unwrap();

            for threads in [0, 2, 3, 4, 16] {
                let tag = Argon2::new(p.clone())
                    .with_threads(threads)
                    .derive(b"password", b"saltsalt")
                    .unwrap();
                assert_eq!(tag, reference, "{variant} v{version} threads={threads}");
            }
        }
    }
}

#[test]
fn default_threads_follow_parallelism() {
    let argon2 = Argon2::new(params(Variant::Argon2id, 1, 64, 8));
    assert_eq!(argon2.threads(), 8);
}

// -------------------------------------------------------
// SENSITIVITY
// -------------------------------------------------------

#[test]
fn argon2_changes_with_salt() {
    let p = params(Variant::Argon2id, 3, 32, 4);
    let a = derive(&p, b"password", b"saltAAAA", None, None).unwrap();
    let b = derive(&p, b"password", b"saltBBBB", None, None).unwrap();
    assert_ne!(a, b);
}

#[test]
fn trailing_nul_byte_changes_output() {
    let p = params(Variant::Argon2id, 1, 32, 1);
    let a = derive(&p, b"password", b"saltsalt", None, None).unwrap();
    let b = derive(&p, b"password\0", b"saltsalt", None, None).unwrap();
    let c = derive(&p, b"password", b"saltsalt\0", None, None).unwrap();
    assert_ne!(a, b);
    assert_ne!(a, c);
}

#[test]
fn every_cost_parameter_changes_output() {
    let base = params(Variant::Argon2id, 2, 64, 2);
    let tag = |p: &Params| derive(p, b"password", b"saltsalt", None, None).unwrap();
    let reference = tag(&base);

    assert_ne!(reference, tag(&params(Variant::Argon2d, 2, 64, 2)));
    assert_ne!(reference, tag(&params(Variant::Argon2i, 2, 64, 2)));
    assert_ne!(reference, tag(&params(Variant::Argon2id, 3, 64, 2)));
    assert_ne!(reference, tag(&params(Variant::Argon2id, 2, 72, 2)));
    assert_ne!(reference, tag(&params(Variant::Argon2id, 2, 64, 4)));
    assert_ne!(reference, tag(&base.clone().with_version(Version::V0x10)));

    // A 31-byte tag is not a prefix of the 32-byte one.
    let shorter = tag(&base.clone().with_hash_len(31).unwrap());
    assert_ne!(&reference[..31], &shorter[..]);
}

#[test]
fn unrounded_memory_cost_is_hashed() {
    // 64 and 65 KiB allocate the same 64 blocks for p = 2.
    let a = derive(&params(Variant::Argon2id, 1, 64, 2), b"pw", b"saltsalt", None, None).unwrap();
    let b = derive(&params(Variant::Argon2id, 1, 65, 2), b"pw", b"saltsalt", None, None).unwrap();
    assert_ne!(a, b);
}

#[test]
fn secret_and_associated_data_change_output() {
    let p = params(Variant::Argon2id, 1, 32, 1);
    let plain = derive(&p, b"password", b"saltsalt", None, None).unwrap();
    let keyed = derive(&p, b"password", b"saltsalt", Some(&b"key"[..]), None).unwrap();
    let with_ad = derive(&p, b"password", b"saltsalt", None, Some(&b"ad"[..])).unwrap();

    assert_ne!(plain, keyed);
    assert_ne!(plain, with_ad);
    assert_ne!(keyed, with_ad);

    // Empty secret and associated data are the same as none.
    let empty = derive(&p, b"password", b"saltsalt", Some(&[][..]), Some(&[][..])).unwrap();
    assert_eq!(plain, empty);
}

#[test]
fn empty_password_is_accepted() {
    let p = params(Variant::Argon2i, 1, 8, 1);
    let tag = derive(&p, b"", b"saltsalt", None, None).unwrap();
    assert_eq!(tag.len(), 32);
}

// -------------------------------------------------------
// OUTPUT LENGTHS
// -------------------------------------------------------

#[test]
fn argon2_respects_output_length() {
    for hash_len in [4, 16, 32, 63, 64, 65, 128, 1000] {
        let p = params(Variant::Argon2id, 1, 32, 1)
            .with_hash_len(hash_len)
            .unwrap();
        let out = derive(&p, b"password", b"saltsalt", None, None).unwrap();
        assert_eq!(out.len(), hash_len as usize);
    }
}

#[test]
fn argon2_minimum_params() {
    let p = params(Variant::Argon2id, 1, 8, 1).with_hash_len(4).unwrap();
    let out = derive(&p, b"pass", b"saltsalt", None, None).unwrap();
    assert_eq!(out.len(), 4);
}

// -------------------------------------------------------
// PARAMETER VALIDATION
// -------------------------------------------------------

#[test]
fn memory_boundary_is_eight_blocks_per_lane() {
    for p in [1, 2, 4, 7] {
        assert_eq!(
            Params::new(Variant::Argon2id, 1, 8 * p - 1, p),
            Err(ParamError::MemoryTooSmall {
                min: 8 * p,
                got: 8 * p - 1
            })
        );
        let ok = Params::new(Variant::Argon2id, 1, 8 * p, p).unwrap();
        assert_eq!(
            derive(&ok, b"password", b"saltsalt", None, None)
                .unwrap()
                .len(),
            32
        );
    }
}

#[test]
fn invalid_cost_parameters_are_rejected() {
    assert_eq!(
        Params::new(Variant::Argon2d, 0, 32, 1),
        Err(ParamError::TimeCostTooSmall)
    );
    assert_eq!(
        Params::new(Variant::Argon2d, 1, 32, 0),
        Err(ParamError::TooFewLanes)
    );
    assert!(matches!(
        Params::new(Variant::Argon2d, 1, u32::MAX, 1 << 24),
        Err(ParamError::TooManyLanes { .. })
    ));
    assert!(matches!(
        params(Variant::Argon2d, 1, 32, 1).with_hash_len(3),
        Err(ParamError::HashTooShort { min: 4, got: 3 })
    ));
    assert!(matches!(
        params(Variant::Argon2d, 1, 32, 1).with_salt_len(7),
        Err(ParamError::SaltTooShort { min: 8, got: 7 })
    ));
}

#[test]
fn short_salt_is_a_parameter_error() {
    let p = params(Variant::Argon2id, 1, 32, 1);
    let err = derive(&p, b"password", b"short", None, None).unwrap_err();
    assert!(matches!(
        err,
        Argon2Error::InvalidParams(ParamError::SaltTooShort { min: 8, got: 5 })
    ));
}

#[test]
fn unsatisfiable_memory_is_an_allocation_error() {
    // About 4 TiB of blocks: reported as an error, not an abort.
    let p = params(Variant::Argon2id, 1, u32::MAX, 1);
    let err = derive(&p, b"password", b"saltsalt", None, None).unwrap_err();
    assert!(matches!(err, Argon2Error::Allocation { .. }), "{err:?}");
}

#[test]
fn memory_is_rounded_down_to_whole_slices() {
    let p = params(Variant::Argon2id, 1, 37, 2);
    assert_eq!(p.memory_cost(), 37);
    assert_eq!(p.block_count(), 32);
    assert_eq!(p.lane_len(), 16);
    assert_eq!(p.segment_len(), 4);
}

#[test]
fn presets_are_valid() {
    for preset in [
        Params::rfc9106_high_memory(),
        Params::rfc9106_low_memory(),
        Params::legacy(),
    ] {
        let rebuilt = Params::new(
            preset.variant(),
            preset.time_cost(),
            preset.memory_cost(),
            preset.parallelism(),
        )
        .unwrap()
        .with_version(preset.version())
        .with_hash_len(preset.hash_len())
        .unwrap()
        .with_salt_len(preset.salt_len())
        .unwrap();
        assert_eq!(rebuilt, preset);
    }

    assert_eq!(Params::default(), Params::rfc9106_low_memory());
    assert_eq!(Params::legacy().hash_len(), 16);
}

#[test]
fn variant_and_version_identifiers() {
    assert_eq!(Variant::Argon2d.as_u32(), 0);
    assert_eq!(Variant::Argon2i.as_u32(), 1);
    assert_eq!(Variant::Argon2id.as_u32(), 2);
    assert_eq!(Variant::try_from(2), Ok(Variant::Argon2id));
    assert_eq!(Variant::try_from(3), Err(3));
    assert_eq!("argon2i".parse::<Variant>(), Ok(Variant::Argon2i));
    assert!("argon2x".parse::<Variant>().is_err());

    assert_eq!(Version::default(), Version::V0x13);
    assert_eq!(Version::try_from(0x10), Ok(Version::V0x10));
    assert!(Version::try_from(0x12).is_err());
    assert_eq!(Version::V0x13.to_string(), "19");

    for version in [Version::V0x10, Version::V0x13] {
        assert_eq!(version.to_string().parse::<Version>(), Ok(version));
    }
    assert_eq!("18".parse::<Version>(), Err(DecodeError::UnsupportedVersion(18)));
    assert_eq!("+19".parse::<Version>(), Err(DecodeError::InvalidNumber("v")));
}
